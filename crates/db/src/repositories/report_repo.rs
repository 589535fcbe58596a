//! Repository for the `reports` table.

use scidraft_core::report::{
    BILLABLE_STATUSES, STATUS_COMPLETED, STATUS_DRAFT, STATUS_FAILED, STATUS_GENERATING,
};
use scidraft_core::types::{DbId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::report::{Report, ReportStatus, StartGeneration};

const COLUMNS: &str = "id, session_id, user_id, practical_id, title, status, draft, result, \
                        error_message, created_at, updated_at";

/// A `generating` row untouched for this long is treated as abandoned and
/// may be restarted.
const STALE_GENERATION_SECS: i64 = 300;

/// Provides CRUD and status operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Create the report for a session in `generating` state, or move an
    /// existing one back to `generating`.
    ///
    /// Returns `None` when the existing row belongs to another user or a
    /// generation is already in flight (and not stale); the conflicting row
    /// is left as is.
    pub async fn start_generation(
        pool: &PgPool,
        input: &StartGeneration,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (session_id, user_id, practical_id, title, status)
             VALUES ($1, $2, $3, $4, '{STATUS_GENERATING}')
             ON CONFLICT (session_id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                practical_id = COALESCE(EXCLUDED.practical_id, reports.practical_id),
                title = COALESCE(EXCLUDED.title, reports.title),
                status = '{STATUS_GENERATING}',
                error_message = NULL
             WHERE (reports.user_id IS NULL OR reports.user_id = EXCLUDED.user_id)
               AND (reports.status <> '{STATUS_GENERATING}'
                    OR reports.updated_at < NOW() - INTERVAL '{STALE_GENERATION_SECS} seconds')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.session_id)
            .bind(input.user_id)
            .bind(&input.practical_id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Store generated content and move the report to `draft`.
    pub async fn mark_draft(
        pool: &PgPool,
        id: DbId,
        title: Option<&str>,
        draft: &serde_json::Value,
    ) -> Result<Report, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET
                status = '{STATUS_DRAFT}',
                draft = $2,
                title = COALESCE(title, $3),
                error_message = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(draft)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    /// Record a failed generation attempt.
    pub async fn mark_failed(pool: &PgPool, id: DbId, error_message: &str) -> Result<(), sqlx::Error> {
        sqlx::query(&format!(
            "UPDATE reports SET status = '{STATUS_FAILED}', error_message = $2 WHERE id = $1"
        ))
        .bind(id)
        .bind(error_message)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Store the student's final content and move the report to `completed`.
    ///
    /// Only `draft` and `completed` reports are updated; returns `None` for
    /// any other state (for example a regeneration started meanwhile).
    pub async fn finalize(
        pool: &PgPool,
        id: DbId,
        result: &serde_json::Value,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET status = '{STATUS_COMPLETED}', result = $2
             WHERE id = $1 AND status IN ('{STATUS_DRAFT}', '{STATUS_COMPLETED}')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(result)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the report for a session. At most one row exists per session.
    pub async fn find_by_session_id(
        pool: &PgPool,
        session_id: Uuid,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE session_id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Status projection used by polling clients.
    pub async fn find_status(
        pool: &PgPool,
        session_id: Uuid,
    ) -> Result<Option<ReportStatus>, sqlx::Error> {
        sqlx::query_as::<_, ReportStatus>(
            "SELECT session_id, status, error_message, updated_at
             FROM reports WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(pool)
        .await
    }

    /// Reports owned by `user_id`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_user(pool: &PgPool, user_id: UserId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Count reports of `user_id` that consume plan allowance, ignoring the
    /// given session (regenerating a report does not cost another one).
    pub async fn count_billable_for_user(
        pool: &PgPool,
        user_id: UserId,
        exclude_session: Uuid,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reports
             WHERE user_id = $1
               AND session_id <> $2
               AND status = ANY($3)",
        )
        .bind(user_id)
        .bind(exclude_session)
        .bind(BILLABLE_STATUSES)
        .fetch_one(pool)
        .await
    }

    /// All reports, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE ($1::text IS NULL OR status = $1)")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Set a report's status (back-office override).
    ///
    /// Only applies while the row is still in `expected_status`. Returns
    /// `None` if the report does not exist or its status changed meanwhile.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
        status: &str,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(expected_status)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
