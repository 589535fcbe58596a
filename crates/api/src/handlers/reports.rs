//! Handlers for the student's `/reports` listing.

use axum::extract::State;
use scidraft_core::search::Page;
use scidraft_db::models::report::Report;
use scidraft_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::extract::{Json, Query};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/reports
pub async fn list_my_reports(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<Page<Report>>>> {
    let page = params.page_request();
    let items =
        ReportRepo::list_for_user(&state.pool, user.user_id, page.limit, page.offset()).await?;
    let total = ReportRepo::count_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(Page::new(items, total, page))))
}
