//! Handlers for the `/manuals` resource.
//!
//! A manual is the parsed practical text of one drafting session, either
//! imported from a curated template or uploaded by the student. Writes are
//! keyed by session id and idempotent: repeating an import for the same
//! session replaces the manual instead of adding a row.

use axum::extract::State;
use scidraft_core::error::CoreError;
use scidraft_core::session_id::{parse_session_id, resolve_session_id};
use scidraft_core::template::practical_metadata;
use scidraft_core::text::{normalize_manual_text, normalize_results_text};
use scidraft_core::types::UserId;
use scidraft_db::models::manual::{
    ManualSession, UpsertManualSession, SOURCE_TEMPLATE, SOURCE_UPLOAD,
};
use scidraft_db::repositories::{ManualSessionRepo, TemplateRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const TEMPLATE_EMPTY: &str = "Template content is empty or invalid";
const UPLOAD_EMPTY: &str = "Manual text is empty or invalid";
const SESSION_NOT_FOUND: &str = "Session not found";
const SESSION_FORBIDDEN: &str = "Session belongs to another user";

/// Maximum stored filename length (characters).
const MAX_FILENAME_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /manuals/import-template`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTemplateRequest {
    #[serde(alias = "template_id")]
    pub template_id: Option<String>,
    /// Any JSON value; only a UUID v4 string is honoured.
    #[serde(default, alias = "session_id")]
    pub session_id: Option<Value>,
}

/// Request body for `POST /manuals/upload`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadManualRequest {
    #[serde(default, alias = "session_id")]
    pub session_id: Option<Value>,
    pub text: String,
    pub filename: Option<String>,
}

/// Request body for `POST /manuals/results`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResultsRequest {
    #[serde(alias = "session_id")]
    pub session_id: String,
    pub results: String,
}

/// Data returned after an import or upload.
#[derive(Debug, Serialize)]
pub struct ManualImported {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    pub parsed_text: String,
    pub practical_metadata: Value,
    pub template_id: Option<String>,
}

impl From<ManualSession> for ManualImported {
    fn from(row: ManualSession) -> Self {
        Self {
            session_id: row.session_id,
            parsed_text: row.parsed_text,
            practical_metadata: row.practical_metadata,
            template_id: row.template_id,
        }
    }
}

fn session_forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden(SESSION_FORBIDDEN.into()))
}

fn requested_session(raw: Option<&Value>) -> Uuid {
    resolve_session_id(raw.and_then(Value::as_str))
}

/// Ensure the caller's account row exists so it can own the manual.
async fn owner_of(state: &AppState, user: Option<&AuthUser>) -> AppResult<Option<UserId>> {
    match user {
        Some(user) => Ok(Some(user.ensure_account(&state.pool).await?.id)),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/manuals/import-template
///
/// Copy a published template into the caller's drafting session. A missing
/// or non-v4 `sessionId` starts a new session.
pub async fn import_template(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(input): Json<ImportTemplateRequest>,
) -> AppResult<Json<DataResponse<ManualImported>>> {
    let template_id = input
        .template_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("templateId is required".into()))?;

    let session_id = requested_session(input.session_id.as_ref());

    let template = TemplateRepo::find_published(&state.pool, template_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".into()))?;

    let parsed_text = normalize_manual_text(&template.practical_content, TEMPLATE_EMPTY)?;
    let metadata = practical_metadata(
        &template.id,
        &template.title,
        template.course_code.as_deref(),
        template.practical_number,
        &template.metadata,
    );

    let row = ManualSessionRepo::upsert(
        &state.pool,
        &UpsertManualSession {
            session_id,
            user_id: owner_of(&state, user.as_ref()).await?,
            template_id: Some(template.id.clone()),
            source: SOURCE_TEMPLATE,
            filename: None,
            parsed_text,
            practical_metadata: metadata,
        },
    )
    .await?
    .ok_or_else(session_forbidden)?;

    tracing::info!(
        session_id = %row.session_id,
        template_id = %template.id,
        chars = row.parsed_text.chars().count(),
        "Template imported into session",
    );

    Ok(Json(DataResponse::new(row.into())))
}

/// POST /api/manuals/upload
///
/// Store manual text extracted by the client (PDF/DOCX parsing happens
/// before upload).
pub async fn upload_manual(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(input): Json<UploadManualRequest>,
) -> AppResult<Json<DataResponse<ManualImported>>> {
    let session_id = requested_session(input.session_id.as_ref());
    let parsed_text = normalize_manual_text(&input.text, UPLOAD_EMPTY)?;

    let filename = input
        .filename
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());
    if let Some(name) = &filename {
        if name.chars().count() > MAX_FILENAME_LENGTH {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Filename exceeds maximum length of {MAX_FILENAME_LENGTH} characters"
            ))));
        }
    }

    let row = ManualSessionRepo::upsert(
        &state.pool,
        &UpsertManualSession {
            session_id,
            user_id: owner_of(&state, user.as_ref()).await?,
            template_id: None,
            source: SOURCE_UPLOAD,
            filename,
            parsed_text,
            practical_metadata: Value::Object(Default::default()),
        },
    )
    .await?
    .ok_or_else(session_forbidden)?;

    tracing::info!(
        session_id = %row.session_id,
        chars = row.parsed_text.chars().count(),
        "Manual uploaded",
    );

    Ok(Json(DataResponse::new(row.into())))
}

/// POST /api/manuals/results
///
/// Attach the student's experimental results to an existing session.
pub async fn save_results(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(input): Json<SaveResultsRequest>,
) -> AppResult<Json<DataResponse<ManualSession>>> {
    let session_id = parse_session_id(&input.session_id)
        .ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.into()))?;
    let results = normalize_results_text(&input.results)?;

    let existing = ManualSessionRepo::find_by_session_id(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.into()))?;

    if let Some(owner) = existing.user_id {
        if user.as_ref().map(|u| u.user_id) != Some(owner) {
            return Err(session_forbidden());
        }
    }

    let row = ManualSessionRepo::set_results(&state.pool, session_id, &results)
        .await?
        .ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.into()))?;

    tracing::info!(session_id = %session_id, chars = results.chars().count(), "Results saved");

    Ok(Json(DataResponse::new(row)))
}

/// GET /api/manuals/status/{session_id}
pub async fn manual_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<DataResponse<ManualSession>>> {
    let session_id = parse_session_id(&session_id)
        .ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.into()))?;

    let row = ManualSessionRepo::find_by_session_id(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.into()))?;

    Ok(Json(DataResponse::new(row)))
}
