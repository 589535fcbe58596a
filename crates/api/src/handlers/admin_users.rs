//! Handlers for student account management under `/admin/users`.

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::plan::validate_plan;
use scidraft_core::search::{contains_pattern, Page, PageRequest};
use scidraft_core::types::UserId;
use scidraft_db::models::user::{UpdateUser, User};
use scidraft_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::{RequireAdmin, RequireModerator, RequireSuperAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Case-insensitive substring of the email or full name.
    pub search: Option<String>,
    pub plan: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireModerator(_admin): RequireModerator,
    Query(params): Query<UserQuery>,
) -> AppResult<Json<DataResponse<Page<User>>>> {
    let page = PageRequest::new(params.page, params.limit);
    let pattern = contains_pattern(params.search.as_deref());
    let plan = params.plan.as_deref().map(str::trim).filter(|p| !p.is_empty());

    let items = UserRepo::list(
        &state.pool,
        pattern.as_deref(),
        plan,
        page.limit,
        page.offset(),
    )
    .await?;
    let total = UserRepo::count(&state.pool, pattern.as_deref(), plan).await?;
    Ok(Json(DataResponse::new(Page::new(items, total, page))))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireModerator(_admin): RequireModerator,
    Path(id): Path<UserId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;
    Ok(Json(DataResponse::new(user)))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<User>>> {
    if let Some(plan) = &input.plan {
        validate_plan(plan)?;
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;

    tracing::info!(
        admin = %admin.email,
        user_id = %id,
        plan = %user.plan,
        is_active = user.is_active,
        "User updated",
    );
    Ok(Json(DataResponse::new(user)))
}

/// DELETE /api/admin/users/{id}
///
/// Removes the account together with its reports, payments and
/// notifications.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<UserId>,
) -> AppResult<StatusCode> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(USER_NOT_FOUND.into()));
    }
    tracing::warn!(admin = %admin.email, user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
