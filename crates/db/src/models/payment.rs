//! Payment model and DTOs.

use scidraft_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub user_id: UserId,
    pub amount: i64,
    pub phone: String,
    pub status: String,
    pub reference: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /payments`.
#[derive(Debug, Deserialize)]
pub struct CreatePayment {
    pub amount: i64,
    pub phone: String,
}

/// Request body for `PUT /admin/payments/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatus {
    pub status: String,
    pub reference: Option<String>,
}
