//! Handlers for the public `/templates` catalogue.

use axum::extract::State;
use scidraft_core::search::{contains_pattern, Page, PageRequest};
use scidraft_db::models::template::{ManualTemplate, TemplateFilter, TemplateSummary};
use scidraft_db::repositories::TemplateRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /templates`.
#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    /// Case-insensitive substring of the title or course code.
    pub search: Option<String>,
    /// Exact course code.
    pub course: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Shared between the public and back-office listings.
pub(crate) async fn list_page(
    state: &AppState,
    params: TemplateQuery,
    include_unpublished: bool,
) -> AppResult<Page<TemplateSummary>> {
    let page = PageRequest::new(params.page, params.limit);
    let filter = TemplateFilter {
        pattern: contains_pattern(params.search.as_deref()),
        course_code: params
            .course
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        include_unpublished,
    };

    let items = TemplateRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;
    let total = TemplateRepo::count(&state.pool, &filter).await?;
    Ok(Page::new(items, total, page))
}

/// GET /api/templates
///
/// Published templates, ordered by course code then practical number.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<TemplateQuery>,
) -> AppResult<Json<DataResponse<Page<TemplateSummary>>>> {
    let page = list_page(&state, params, false).await?;
    Ok(Json(DataResponse::new(page)))
}

/// GET /api/templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ManualTemplate>>> {
    let template = TemplateRepo::find_published(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".into()))?;
    Ok(Json(DataResponse::new(template)))
}
