//! Role-based access control (RBAC) extractors for the back-office.
//!
//! Each extractor wraps [`CurrentAdmin`] and rejects with 403 when the
//! session's role is below the endpoint's minimum. A missing session is
//! still 401, so "wrong role" and "not logged in" stay distinguishable.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use scidraft_core::admin_session::AdminSession;
use scidraft_core::error::CoreError;
use scidraft_core::roles::AdminRole;

use super::admin_session::CurrentAdmin;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    required: AdminRole,
) -> Result<AdminSession, AppError> {
    let CurrentAdmin(session) = CurrentAdmin::from_request_parts(parts, state).await?;
    if !session.role.satisfies(required) {
        tracing::warn!(
            admin = %session.email,
            role = %session.role,
            required = %required,
            path = %parts.uri.path(),
            "Admin role insufficient"
        );
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{required} role required"
        ))));
    }
    Ok(session)
}

/// Requires at least the `moderator` role.
///
/// ```ignore
/// async fn list_feedback(RequireModerator(admin): RequireModerator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireModerator(pub AdminSession);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, AdminRole::Moderator)
            .await
            .map(RequireModerator)
    }
}

/// Requires at least the `admin` role.
pub struct RequireAdmin(pub AdminSession);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, AdminRole::Admin)
            .await
            .map(RequireAdmin)
    }
}

/// Requires the `super_admin` role.
pub struct RequireSuperAdmin(pub AdminSession);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, AdminRole::SuperAdmin)
            .await
            .map(RequireSuperAdmin)
    }
}
