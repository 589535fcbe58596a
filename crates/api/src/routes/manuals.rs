//! Route definitions for the `/manuals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::manuals;
use crate::state::AppState;

/// Routes mounted at `/manuals`.
///
/// ```text
/// POST /import-template        -> import_template
/// POST /upload                 -> upload_manual
/// POST /results                -> save_results
/// GET  /status/{session_id}    -> manual_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/import-template", post(manuals::import_template))
        .route("/upload", post(manuals::upload_manual))
        .route("/results", post(manuals::save_results))
        .route("/status/{session_id}", get(manuals::manual_status))
}
