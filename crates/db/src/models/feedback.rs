//! Feedback model and DTOs.

use scidraft_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub user_id: Option<UserId>,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for `POST /feedback`.
#[derive(Debug, Deserialize)]
pub struct CreateFeedback {
    pub rating: i16,
    pub comment: Option<String>,
}
