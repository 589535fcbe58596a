//! Handlers for the `/auth` resource.
//!
//! Student sign-in, sign-up and sign-out happen against the identity
//! provider directly; these endpoints only tell clients so.

use crate::error::{AppError, AppResult};

const HANDLED_BY_PROVIDER: &str = "Authentication is handled by the identity provider";

fn not_implemented() -> AppError {
    AppError::NotImplemented(HANDLED_BY_PROVIDER.to_string())
}

/// POST /api/auth/login
pub async fn login() -> AppResult<()> {
    Err(not_implemented())
}

/// POST /api/auth/register
pub async fn register() -> AppResult<()> {
    Err(not_implemented())
}

/// POST /api/auth/logout
pub async fn logout() -> AppResult<()> {
    Err(not_implemented())
}
