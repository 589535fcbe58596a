//! Repository for the `payments` table.

use scidraft_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::payment::Payment;

const COLUMNS: &str = "id, user_id, amount, phone, status, reference, created_at, updated_at";

/// Provides CRUD operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a pending payment. `phone` must already be normalized.
    pub async fn create(
        pool: &PgPool,
        user_id: UserId,
        amount: i64,
        phone: &str,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (user_id, amount, phone)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .bind(amount)
            .bind(phone)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: UserId) -> Result<Vec<Payment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM payments WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All payments, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE ($1::text IS NULL OR status = $1)")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Move a payment from `expected_status` to `status`.
    ///
    /// The `WHERE status = expected_status` guard makes concurrent updates
    /// of the same payment fail instead of double-applying. Returns `None`
    /// if the payment does not exist or its status changed meanwhile.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
        status: &str,
        reference: Option<&str>,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET status = $3, reference = COALESCE($4, reference)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(expected_status)
            .bind(status)
            .bind(reference)
            .fetch_optional(pool)
            .await
    }
}
