//! Handlers for the `/drafts` resource: report generation, status polling
//! and finalization.

use axum::extract::State;
use scidraft_core::error::CoreError;
use scidraft_core::plan::ensure_can_generate;
use scidraft_core::prompt::{build_report_prompt, PromptInput};
use scidraft_core::report::{can_finalize, parse_generated_report, validate_report_content};
use scidraft_core::session_id::parse_session_id;
use scidraft_core::template::validate_title;
use scidraft_db::models::report::{Report, ReportStatus, StartGeneration};
use scidraft_db::repositories::{ManualSessionRepo, ReportRepo};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, AppResult, GENERATION_FAILED_MESSAGE};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const SESSION_NOT_FOUND: &str = "Session not found";
const REPORT_NOT_FOUND: &str = "Report not found";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /drafts/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(alias = "session_id")]
    pub session_id: String,
    pub title: Option<String>,
}

/// Request body for `PUT /drafts/{session_id}/finalize`.
#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    pub content: Value,
}

fn report_session(raw: &str) -> AppResult<Uuid> {
    parse_session_id(raw).ok_or_else(|| AppError::NotFound(REPORT_NOT_FOUND.into()))
}

/// Load a report that must belong to `user`. Other users' reports are
/// reported as missing.
async fn owned_report(state: &AppState, session_id: Uuid, user: &AuthUser) -> AppResult<Report> {
    ReportRepo::find_by_session_id(&state.pool, session_id)
        .await?
        .filter(|report| report.user_id == Some(user.user_id))
        .ok_or_else(|| AppError::NotFound(REPORT_NOT_FOUND.into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/drafts/generate
///
/// Generate (or regenerate) the report for a session from its manual and
/// results. Free-plan students are limited to one generated report.
pub async fn generate_report(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let session_id = parse_session_id(&input.session_id)
        .ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.into()))?;

    // 1. The session needs a manual and results.
    let manual = ManualSessionRepo::find_by_session_id(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.into()))?;
    if manual.user_id.is_some_and(|owner| owner != user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Session belongs to another user".into(),
        )));
    }
    let results = manual
        .results_text
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| {
            AppError::BadRequest(
                "Experimental results are required before generating a report".into(),
            )
        })?;

    let title = input
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    if let Some(title) = &title {
        validate_title(title)?;
    }

    // 2. Account and plan allowance.
    let account = user.ensure_account(&state.pool).await?;
    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    let generated = ReportRepo::count_billable_for_user(&state.pool, account.id, session_id).await?;
    if let Err(err) = ensure_can_generate(&account.plan, generated) {
        tracing::info!(user_id = %account.id, generated, "Generation refused by plan limit");
        return Err(err.into());
    }

    // 3. Claim the report row.
    if let Some(existing) = ReportRepo::find_by_session_id(&state.pool, session_id).await? {
        if existing.user_id.is_some_and(|owner| owner != account.id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Session belongs to another user".into(),
            )));
        }
    }
    let report = ReportRepo::start_generation(
        &state.pool,
        &StartGeneration {
            session_id,
            user_id: account.id,
            practical_id: manual.template_id.clone(),
            title: title.clone(),
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "A report is already being generated for this session".into(),
        ))
    })?;

    tracing::info!(report_id = report.id, session_id = %session_id, user_id = %account.id, "Report generation started");

    // 4. Prompt the model and validate its reply.
    let prompt = build_report_prompt(PromptInput {
        manual_text: &manual.parsed_text,
        results_text: results,
        title: title.as_deref(),
        practical_metadata: &manual.practical_metadata,
    });
    let outcome = match state.generator.generate(&prompt).await {
        Ok(raw) => parse_generated_report(&raw).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    // 5. Record the outcome.
    match outcome {
        Ok(content) => {
            let generated_title = content
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string);
            let report = ReportRepo::mark_draft(
                &state.pool,
                report.id,
                generated_title.as_deref(),
                &Value::Object(content),
            )
            .await?;
            tracing::info!(report_id = report.id, session_id = %session_id, "Report draft generated");
            Ok(Json(DataResponse::new(report)))
        }
        Err(detail) => {
            ReportRepo::mark_failed(&state.pool, report.id, GENERATION_FAILED_MESSAGE).await?;
            Err(AppError::GenerationFailed(format!(
                "report {} (session {session_id}): {detail}",
                report.id
            )))
        }
    }
}

/// GET /api/drafts/status/{session_id}
pub async fn draft_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<DataResponse<ReportStatus>>> {
    let session_id = report_session(&session_id)?;
    let status = ReportRepo::find_status(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(REPORT_NOT_FOUND.into()))?;
    Ok(Json(DataResponse::new(status)))
}

/// GET /api/drafts/{session_id}
pub async fn get_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<String>,
) -> AppResult<Json<DataResponse<Report>>> {
    let session_id = report_session(&session_id)?;
    let report = owned_report(&state, session_id, &user).await?;
    Ok(Json(DataResponse::new(report)))
}

/// PUT /api/drafts/{session_id}/finalize
///
/// Store the student's edited content and mark the report completed.
pub async fn finalize_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<String>,
    Json(input): Json<FinalizeRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let session_id = report_session(&session_id)?;
    let Value::Object(content) = &input.content else {
        return Err(AppError::BadRequest(
            "Report content must be a JSON object".into(),
        ));
    };
    validate_report_content(content)?;

    let report = owned_report(&state, session_id, &user).await?;
    let not_finalizable = || {
        AppError::BadRequest(format!(
            "Cannot finalize a report in '{}' state",
            report.status
        ))
    };
    if !can_finalize(&report.status) {
        return Err(not_finalizable());
    }

    let report = ReportRepo::finalize(&state.pool, report.id, &input.content)
        .await?
        .ok_or_else(not_finalizable)?;

    tracing::info!(report_id = report.id, session_id = %session_id, "Report finalized");
    Ok(Json(DataResponse::new(report)))
}
