//! Handler for `POST /feedback`. Anonymous feedback is accepted.

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::feedback::{normalize_comment, validate_rating};
use scidraft_db::models::feedback::{CreateFeedback, Feedback};
use scidraft_db::repositories::FeedbackRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(input): Json<CreateFeedback>,
) -> AppResult<(StatusCode, Json<DataResponse<Feedback>>)> {
    validate_rating(input.rating)?;
    let comment = normalize_comment(input.comment.as_deref())?;

    let user_id = match &user {
        Some(user) => Some(user.ensure_account(&state.pool).await?.id),
        None => None,
    };

    let feedback =
        FeedbackRepo::create(&state.pool, user_id, input.rating, comment.as_deref()).await?;

    tracing::info!(feedback_id = feedback.id, rating = feedback.rating, "Feedback submitted");

    Ok((StatusCode::CREATED, Json(DataResponse::new(feedback))))
}
