//! Notification model and DTOs.

use scidraft_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    /// `None` for broadcasts.
    pub user_id: Option<UserId>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification (admin-authored or system-generated).
#[derive(Debug, Deserialize)]
pub struct CreateNotification {
    /// Omit to broadcast to every student.
    pub user_id: Option<UserId>,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
}
