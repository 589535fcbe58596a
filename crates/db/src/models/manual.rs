//! Manual session model and DTOs.

use scidraft_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Manual came from a student upload.
pub const SOURCE_UPLOAD: &str = "upload";
/// Manual was imported from a curated template.
pub const SOURCE_TEMPLATE: &str = "template";

/// A row from the `manual_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ManualSession {
    pub id: DbId,
    pub session_id: Uuid,
    pub user_id: Option<UserId>,
    pub template_id: Option<String>,
    pub source: String,
    pub filename: Option<String>,
    pub parsed_text: String,
    pub practical_metadata: serde_json::Value,
    pub results_text: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by an upload or template import.
#[derive(Debug)]
pub struct UpsertManualSession {
    pub session_id: Uuid,
    pub user_id: Option<UserId>,
    pub template_id: Option<String>,
    pub source: &'static str,
    pub filename: Option<String>,
    pub parsed_text: String,
    pub practical_metadata: serde_json::Value,
}
