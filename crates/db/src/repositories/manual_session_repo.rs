//! Repository for the `manual_sessions` table.
//!
//! Rows are keyed by the drafting `session_id`. Writes use
//! `ON CONFLICT (session_id)` so repeated or concurrent imports for the
//! same session converge on a single row.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::manual::{ManualSession, UpsertManualSession};

const COLUMNS: &str = "id, session_id, user_id, template_id, source, filename, parsed_text, \
                        practical_metadata, results_text, created_at, updated_at";

/// Provides upsert and lookup operations for manual sessions.
pub struct ManualSessionRepo;

impl ManualSessionRepo {
    /// Insert the manual for a session, or replace it if the session exists.
    ///
    /// An anonymous session is claimed by the first authenticated writer.
    /// A session that already has an owner is only replaced by that owner;
    /// any other write returns `None`. Results already attached to the
    /// session are preserved.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertManualSession,
    ) -> Result<Option<ManualSession>, sqlx::Error> {
        let query = format!(
            "INSERT INTO manual_sessions
                (session_id, user_id, template_id, source, filename, parsed_text, practical_metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (session_id) DO UPDATE SET
                user_id = COALESCE(EXCLUDED.user_id, manual_sessions.user_id),
                template_id = EXCLUDED.template_id,
                source = EXCLUDED.source,
                filename = EXCLUDED.filename,
                parsed_text = EXCLUDED.parsed_text,
                practical_metadata = EXCLUDED.practical_metadata
             WHERE manual_sessions.user_id IS NULL
                OR manual_sessions.user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ManualSession>(&query)
            .bind(input.session_id)
            .bind(input.user_id)
            .bind(&input.template_id)
            .bind(input.source)
            .bind(&input.filename)
            .bind(&input.parsed_text)
            .bind(&input.practical_metadata)
            .fetch_optional(pool)
            .await
    }

    /// Find the manual for a session. At most one row exists per session.
    pub async fn find_by_session_id(
        pool: &PgPool,
        session_id: Uuid,
    ) -> Result<Option<ManualSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manual_sessions WHERE session_id = $1");
        sqlx::query_as::<_, ManualSession>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Attach experimental results to an existing session.
    ///
    /// Returns `None` if the session has no manual yet.
    pub async fn set_results(
        pool: &PgPool,
        session_id: Uuid,
        results_text: &str,
    ) -> Result<Option<ManualSession>, sqlx::Error> {
        let query = format!(
            "UPDATE manual_sessions SET results_text = $2
             WHERE session_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ManualSession>(&query)
            .bind(session_id)
            .bind(results_text)
            .fetch_optional(pool)
            .await
    }
}
