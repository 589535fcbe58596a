//! Student account model and DTOs.

use scidraft_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub plan: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for back-office edits. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub plan: Option<String>,
    pub is_active: Option<bool>,
}
