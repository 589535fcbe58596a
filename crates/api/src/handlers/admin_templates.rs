//! Handlers for the template catalogue under `/admin/templates`.
//!
//! Unlike the public listing, the back-office sees unpublished templates.

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::error::CoreError;
use scidraft_core::search::Page;
use scidraft_core::template::{validate_practical_number, validate_template_id, validate_title};
use scidraft_core::text::normalize_manual_text;
use scidraft_db::models::template::{
    CreateTemplate, ManualTemplate, TemplateSummary, UpdateTemplate,
};
use scidraft_db::repositories::TemplateRepo;

use super::templates::{list_page, TemplateQuery};
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const TEMPLATE_NOT_FOUND: &str = "Template not found";
const CONTENT_INVALID: &str = "Practical content is empty or invalid";

/// GET /api/admin/templates
pub async fn list_templates(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<TemplateQuery>,
) -> AppResult<Json<DataResponse<Page<TemplateSummary>>>> {
    let page = list_page(&state, params, true).await?;
    Ok(Json(DataResponse::new(page)))
}

/// POST /api/admin/templates
pub async fn create_template(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateTemplate>,
) -> AppResult<(StatusCode, Json<DataResponse<ManualTemplate>>)> {
    let id = input.id.trim().to_string();
    validate_template_id(&id)?;
    validate_title(&input.title)?;
    validate_practical_number(input.practical_number)?;
    normalize_manual_text(&input.practical_content, CONTENT_INVALID)?;

    if TemplateRepo::find_by_id(&state.pool, &id).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Template '{id}' already exists"
        ))));
    }

    let template = TemplateRepo::create(
        &state.pool,
        &CreateTemplate {
            id,
            title: input.title.trim().to_string(),
            ..input
        },
    )
    .await?;

    tracing::info!(admin = %admin.email, template_id = %template.id, "Template created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(template))))
}

/// PUT /api/admin/templates/{id}
pub async fn update_template(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<Json<DataResponse<ManualTemplate>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    validate_practical_number(input.practical_number)?;
    if let Some(content) = &input.practical_content {
        normalize_manual_text(content, CONTENT_INVALID)?;
    }

    let template = TemplateRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(TEMPLATE_NOT_FOUND.into()))?;

    tracing::info!(admin = %admin.email, template_id = %id, "Template updated");
    Ok(Json(DataResponse::new(template)))
}

/// DELETE /api/admin/templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !TemplateRepo::delete(&state.pool, &id).await? {
        return Err(AppError::NotFound(TEMPLATE_NOT_FOUND.into()));
    }
    tracing::warn!(admin = %admin.email, template_id = %id, "Template deleted");
    Ok(StatusCode::NO_CONTENT)
}
