//! Repository for the `feedback` table.

use scidraft_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::feedback::Feedback;

const COLUMNS: &str = "id, user_id, rating, comment, created_at";

pub struct FeedbackRepo;

impl FeedbackRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Option<UserId>,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (user_id, rating, comment)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(user_id)
            .bind(rating)
            .bind(comment)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
