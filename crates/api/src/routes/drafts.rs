//! Route definitions for the `/drafts` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::drafts;
use crate::state::AppState;

/// Routes mounted at `/drafts`.
///
/// ```text
/// POST /generate                  -> generate_report (auth)
/// GET  /status/{session_id}       -> draft_status
/// GET  /{session_id}              -> get_draft (auth, owner)
/// PUT  /{session_id}/finalize     -> finalize_draft (auth, owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(drafts::generate_report))
        .route("/status/{session_id}", get(drafts::draft_status))
        .route("/{session_id}", get(drafts::get_draft))
        .route("/{session_id}/finalize", put(drafts::finalize_draft))
}
