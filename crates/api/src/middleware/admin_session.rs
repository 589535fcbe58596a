//! Admin session middleware and extractor.
//!
//! [`require_admin_session`] guards the `/admin` tree: requests without a
//! valid `admin-session` cookie get 401 (plus a clearing cookie when the
//! session expired or was tampered with). Valid sessions are re-issued with
//! a fresh timestamp on the way out, so the two-minute window slides with
//! activity.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use scidraft_core::admin_session::AdminSession;
use scidraft_core::error::CoreError;

use crate::auth::admin_cookie::{check_request, session_cookie, CLEAR_ADMIN_COOKIE, ERR_NO_SESSION};
use crate::error::AppError;
use crate::state::AppState;

/// The validated admin session of the current request.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminSession);

/// Reject requests without a valid admin session; refresh valid ones.
pub async fn require_admin_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let config = &state.config.admin_session;
    let check = check_request(request.headers(), Utc::now(), config);

    let Some(session) = check.admin else {
        let message = check.error.unwrap_or(ERR_NO_SESSION);
        tracing::debug!(path = %request.uri().path(), error = message, "Admin session rejected");

        let mut response =
            AppError::Core(CoreError::Unauthorized(message.to_string())).into_response();
        if check.clear_cookie {
            response
                .headers_mut()
                .append(SET_COOKIE, HeaderValue::from_static(CLEAR_ADMIN_COOKIE));
        }
        return response;
    };

    request.extensions_mut().insert(CurrentAdmin(session.clone()));
    let mut response = next.run(request).await;

    // Handlers that set their own cookie (logout) win.
    if !response.headers().contains_key(SET_COOKIE) {
        let cookie = session_cookie(&session.refreshed(Utc::now()), config);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode admin session cookie"),
        }
    }
    response
}

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(ERR_NO_SESSION.to_string())))
    }
}
