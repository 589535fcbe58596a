//! Route definitions for the public `/templates` catalogue.

use axum::routing::get;
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET /       -> list_templates
/// GET /{id}   -> get_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(templates::list_templates))
        .route("/{id}", get(templates::get_template))
}
