//! Handlers for feedback moderation under `/admin/feedback`.

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::search::Page;
use scidraft_core::types::DbId;
use scidraft_db::models::feedback::Feedback;
use scidraft_db::repositories::FeedbackRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::{RequireAdmin, RequireModerator};
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    RequireModerator(_admin): RequireModerator,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<Page<Feedback>>>> {
    let page = params.page_request();
    let items = FeedbackRepo::list(&state.pool, page.limit, page.offset()).await?;
    let total = FeedbackRepo::count(&state.pool).await?;
    Ok(Json(DataResponse::new(Page::new(items, total, page))))
}

/// DELETE /api/admin/feedback/{id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FeedbackRepo::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Feedback not found".into()));
    }
    tracing::warn!(admin = %admin.email, feedback_id = id, "Feedback deleted");
    Ok(StatusCode::NO_CONTENT)
}
