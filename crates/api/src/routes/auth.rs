//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`. All answer 501.
///
/// ```text
/// POST /login     -> login
/// POST /register  -> register
/// POST /logout    -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}
