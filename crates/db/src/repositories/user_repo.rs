//! Repository for the `users` table.

use scidraft_core::types::UserId;
use sqlx::PgPool;

use crate::models::user::{UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, full_name, plan, is_active, created_at, updated_at";

/// Provides CRUD operations for student accounts.
pub struct UserRepo;

impl UserRepo {
    /// Make sure a row exists for an authenticated subject, returning it.
    ///
    /// The email follows the identity provider whenever the token carries
    /// one. Subjects without an email get a per-id placeholder address.
    pub async fn ensure(
        pool: &PgPool,
        id: UserId,
        email: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email)
             VALUES ($1, COALESCE($2, $1::text || '@users.invalid'))
             ON CONFLICT (id) DO UPDATE SET email = COALESCE($2, users.email)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List users, newest first, optionally filtered by an email/name
    /// `ILIKE` pattern and by plan.
    pub async fn list(
        pool: &PgPool,
        pattern: Option<&str>,
        plan: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::text IS NULL OR email ILIKE $1 OR full_name ILIKE $1)
               AND ($2::text IS NULL OR plan = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(pattern)
            .bind(plan)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count users matching the same filters as [`UserRepo::list`].
    pub async fn count(
        pool: &PgPool,
        pattern: Option<&str>,
        plan: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM users
             WHERE ($1::text IS NULL OR email ILIKE $1 OR full_name ILIKE $1)
               AND ($2::text IS NULL OR plan = $2)",
        )
        .bind(pattern)
        .bind(plan)
        .fetch_one(pool)
        .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: UserId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                full_name = COALESCE($2, full_name),
                plan = COALESCE($3, plan),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.plan)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Set a user's plan. Returns `true` if the row was updated.
    pub async fn set_plan(pool: &PgPool, id: UserId, plan: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET plan = $2 WHERE id = $1")
            .bind(id)
            .bind(plan)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a user and (via cascades) their reports, payments and
    /// notifications. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
