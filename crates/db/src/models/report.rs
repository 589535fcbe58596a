//! Report model and DTOs.

use scidraft_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub session_id: Uuid,
    pub user_id: Option<UserId>,
    pub practical_id: Option<String>,
    pub title: Option<String>,
    pub status: String,
    pub draft: Option<serde_json::Value>,
    pub result: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight projection returned by the status polling endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportStatus {
    pub session_id: Uuid,
    pub status: String,
    pub error_message: Option<String>,
    pub updated_at: Timestamp,
}

/// Values written when a generation attempt starts.
#[derive(Debug)]
pub struct StartGeneration {
    pub session_id: Uuid,
    pub user_id: UserId,
    pub practical_id: Option<String>,
    pub title: Option<String>,
}

/// Query parameters for report listings.
#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
