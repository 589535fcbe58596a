//! Handlers for back-office sign-in: `/admin/login`, `/admin/logout` and
//! `/admin/session`.
//!
//! Sign-in checks an Argon2 hash and sets the signed `admin-session`
//! cookie. Lockout state lives in `admin_users` so it holds across
//! instances.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use chrono::Utc;
use scidraft_core::admin_session::AdminSession;
use scidraft_core::error::CoreError;
use scidraft_core::roles::AdminRole;
use scidraft_db::repositories::AdminUserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::admin_cookie::{session_cookie, CLEAR_ADMIN_COOKIE};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::admin_session::CurrentAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in admin, as returned by login and `/admin/session`.
#[derive(Debug, Serialize)]
pub struct AdminIdentity {
    pub email: String,
    pub role: AdminRole,
    /// Unix milliseconds at which the current cookie was issued.
    pub timestamp: i64,
}

impl From<AdminSession> for AdminIdentity {
    fn from(session: AdminSession) -> Self {
        Self {
            email: session.email,
            role: session.role,
            timestamp: session.timestamp,
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<AdminLoginRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Find the account. Unknown emails look like bad passwords.
    let admin = AdminUserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    // 2. Inactive or locked accounts cannot sign in.
    if !admin.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    if admin.locked_until.is_some_and(|until| until > Utc::now()) {
        tracing::warn!(admin = %admin.email, "Login attempt on locked admin account");
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        )));
    }

    // 3. Verify the password; count failures and lock on the threshold.
    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failures = AdminUserRepo::increment_failed_login(&state.pool, admin.id).await?;
        tracing::warn!(admin = %admin.email, failures, "Admin login failed");

        if failures >= MAX_FAILED_ATTEMPTS {
            let until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            AdminUserRepo::lock_account(&state.pool, admin.id, until).await?;
            tracing::warn!(admin = %admin.email, locked_until = %until, "Admin account locked");
        }
        return Err(invalid_credentials());
    }

    // 4. The stored role must still be one we recognise.
    let role: AdminRole = admin.role.parse().map_err(|_| {
        AppError::InternalError(format!("Admin {} has unknown role '{}'", admin.id, admin.role))
    })?;

    AdminUserRepo::record_successful_login(&state.pool, admin.id).await?;

    // 5. Issue the cookie.
    let session = AdminSession::new(admin.email.clone(), role, Utc::now());
    let cookie = HeaderValue::from_str(&session_cookie(&session, &state.config.admin_session))
        .map_err(|e| AppError::InternalError(format!("Cookie encoding error: {e}")))?;

    tracing::info!(admin = %session.email, role = %role, "Admin signed in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(DataResponse::new(AdminIdentity::from(session))),
    ))
}

/// POST /api/admin/logout
///
/// Always succeeds; the cookie is cleared whether or not it was valid.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, HeaderValue::from_static(CLEAR_ADMIN_COOKIE))]),
    )
}

/// GET /api/admin/session
pub async fn current_session(
    CurrentAdmin(session): CurrentAdmin,
) -> Json<DataResponse<AdminIdentity>> {
    Json(DataResponse::new(session.into()))
}
