//! Student bearer-token extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use scidraft_core::error::CoreError;
use scidraft_core::types::UserId;
use scidraft_db::models::user::User;
use scidraft_db::repositories::UserRepo;
use scidraft_db::DbPool;

use crate::auth::jwt::{validate_token, TokenError};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Student identity extracted from `Authorization: Bearer <jwt>`.
///
/// Use `AuthUser` on owner-scoped endpoints and `Option<AuthUser>` where
/// anonymous callers are allowed. A present but invalid token is rejected
/// in both cases.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: Option<String>,
    pub role: String,
}

impl AuthUser {
    /// Create or refresh the `users` row for this identity.
    pub async fn ensure_account(&self, pool: &DbPool) -> Result<User, sqlx::Error> {
        UserRepo::ensure(pool, self.user_id, self.email.as_deref()).await
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

fn authenticate(header: &str, state: &AppState) -> AppResult<AuthUser> {
    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization format. Expected: Bearer <token>")
    })?;

    let claims = validate_token(token.trim(), &state.config.jwt).map_err(|err| match err {
        TokenError::SessionExpired => unauthorized("Session expired"),
        TokenError::Invalid(_) => unauthorized("Invalid or expired token"),
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts)
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;
        authenticate(header, state)
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        authorization_header(parts)
            .map(|header| authenticate(header, state))
            .transpose()
    }
}
