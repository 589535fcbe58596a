//! Handlers for notifications under `/admin/notifications`.
//!
//! A notification without `user_id` is a broadcast shown to every student.

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::notification::validate_notification;
use scidraft_core::search::Page;
use scidraft_core::types::DbId;
use scidraft_db::models::notification::{CreateNotification, Notification};
use scidraft_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::{RequireAdmin, RequireModerator};
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    RequireModerator(_admin): RequireModerator,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<Page<Notification>>>> {
    let page = params.page_request();
    let items = NotificationRepo::list(&state.pool, page.limit, page.offset()).await?;
    let total = NotificationRepo::count(&state.pool).await?;
    Ok(Json(DataResponse::new(Page::new(items, total, page))))
}

/// POST /api/admin/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    let input = CreateNotification {
        user_id: input.user_id,
        kind: input.kind.trim().to_string(),
        title: input.title.trim().to_string(),
        message: input.message.trim().to_string(),
    };
    validate_notification(&input.kind, &input.title, &input.message)?;

    let notification = NotificationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        admin = %admin.email,
        notification_id = notification.id,
        broadcast = notification.user_id.is_none(),
        "Notification created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(notification))))
}

/// DELETE /api/admin/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NotificationRepo::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Notification not found".into()));
    }
    tracing::warn!(admin = %admin.email, notification_id = id, "Notification deleted");
    Ok(StatusCode::NO_CONTENT)
}
