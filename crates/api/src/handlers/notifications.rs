//! Handlers for the student's `/notifications` resource.

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::search::PageRequest;
use scidraft_core::types::DbId;
use scidraft_db::models::notification::Notification;
use scidraft_db::repositories::NotificationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/notifications
///
/// Notifications addressed to the caller plus broadcasts, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let page = PageRequest::new(params.page, params.limit);
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        user.user_id,
        params.unread_only,
        page.limit,
        page.offset(),
    )
    .await?;
    Ok(Json(DataResponse::new(notifications)))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NotificationRepo::mark_read(&state.pool, id, user.user_id).await? {
        return Err(AppError::NotFound("Notification not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
