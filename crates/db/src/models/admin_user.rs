//! Back-office account model and DTOs.

use scidraft_core::roles::AdminRole;
use scidraft_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `admin_users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`AdminUserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe admin representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<AdminUser> for AdminUserResponse {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            role: admin.role,
            is_active: admin.is_active,
            last_login_at: admin.last_login_at,
            created_at: admin.created_at,
        }
    }
}

/// DTO for creating a back-office account.
#[derive(Debug)]
pub struct CreateAdminUser {
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
}
