//! Repository for the `notifications` table.

use scidraft_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, type, title, message, is_read, read_at, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, type, title, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Notifications addressed to `user_id` plus broadcasts, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE (user_id = $1 OR user_id IS NULL) {filter} \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a notification addressed to `user_id` as read.
    ///
    /// Broadcast rows are shared and never marked. Returns `true` if the
    /// notification belongs to the user (already-read rows count as found).
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = COALESCE(read_at, NOW()) \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All notifications, newest first (back-office view).
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
