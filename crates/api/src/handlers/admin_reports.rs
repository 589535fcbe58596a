//! Handlers for report oversight under `/admin/reports`.

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::error::CoreError;
use scidraft_core::report::{validate_status, validate_transition};
use scidraft_core::search::{Page, PageRequest};
use scidraft_core::types::DbId;
use scidraft_db::models::report::{Report, ReportListParams};
use scidraft_db::repositories::ReportRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::{RequireAdmin, RequireModerator};
use crate::response::DataResponse;
use crate::state::AppState;

const REPORT_NOT_FOUND: &str = "Report not found";

/// Request body for `PUT /admin/reports/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateReportStatusRequest {
    pub status: String,
}

/// GET /api/admin/reports
pub async fn list_reports(
    State(state): State<AppState>,
    RequireModerator(_admin): RequireModerator,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<DataResponse<Page<Report>>>> {
    let status = params.status.as_deref().map(str::trim).filter(|s| !s.is_empty());
    if let Some(status) = status {
        validate_status(status)?;
    }

    let page = PageRequest::new(params.page, params.limit);
    let items = ReportRepo::list(&state.pool, status, page.limit, page.offset()).await?;
    let total = ReportRepo::count(&state.pool, status).await?;
    Ok(Json(DataResponse::new(Page::new(items, total, page))))
}

/// GET /api/admin/reports/{id}
pub async fn get_report(
    State(state): State<AppState>,
    RequireModerator(_admin): RequireModerator,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Report>>> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(REPORT_NOT_FOUND.into()))?;
    Ok(Json(DataResponse::new(report)))
}

/// PUT /api/admin/reports/{id}/status
pub async fn update_report_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReportStatusRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let current = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(REPORT_NOT_FOUND.into()))?;
    validate_transition(&current.status, &input.status)?;

    let report = ReportRepo::update_status(&state.pool, id, &current.status, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Report status changed concurrently; reload and retry".into(),
            ))
        })?;

    tracing::info!(
        admin = %admin.email,
        report_id = id,
        from = %current.status,
        to = %report.status,
        "Report status changed",
    );
    Ok(Json(DataResponse::new(report)))
}

/// DELETE /api/admin/reports/{id}
pub async fn delete_report(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReportRepo::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(REPORT_NOT_FOUND.into()));
    }
    tracing::warn!(admin = %admin.email, report_id = id, "Report deleted");
    Ok(StatusCode::NO_CONTENT)
}
