//! Repository for the `admin_users` table.

use scidraft_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::admin_user::{AdminUser, CreateAdminUser};

const COLUMNS: &str = "id, email, password_hash, role, is_active, failed_login_count, \
                        locked_until, last_login_at, created_at, updated_at";

/// Provides CRUD and login bookkeeping for back-office accounts.
pub struct AdminUserRepo;

impl AdminUserRepo {
    pub async fn create(pool: &PgPool, input: &CreateAdminUser) -> Result<AdminUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find an admin by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users ORDER BY created_at DESC");
        sqlx::query_as::<_, AdminUser>(&query).fetch_all(pool).await
    }

    /// Increment the failed login counter, returning the new count.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE admin_users SET failed_login_count = failed_login_count + 1
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Lock an account until the specified timestamp.
    pub async fn lock_account(pool: &PgPool, id: DbId, until: Timestamp) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admin_users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear
    /// `locked_until`, and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE admin_users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
