//! Route definitions for the student's own reports, payments, feedback and
//! notifications.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{feedback, notifications, payments, reports};
use crate::state::AppState;

/// `/reports` routes.
///
/// ```text
/// GET /   -> list_my_reports (auth)
/// ```
pub fn reports_router() -> Router<AppState> {
    Router::new().route("/", get(reports::list_my_reports))
}

/// `/payments` routes.
///
/// ```text
/// GET  /   -> list_my_payments (auth)
/// POST /   -> create_payment (auth)
/// ```
pub fn payments_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(payments::list_my_payments).post(payments::create_payment),
    )
}

/// `/feedback` routes.
///
/// ```text
/// POST /   -> submit_feedback (auth optional)
/// ```
pub fn feedback_router() -> Router<AppState> {
    Router::new().route("/", post(feedback::submit_feedback))
}

/// `/notifications` routes.
///
/// ```text
/// GET  /             -> list_notifications (auth)
/// POST /{id}/read    -> mark_read (auth)
/// ```
pub fn notifications_router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/{id}/read", post(notifications::mark_read))
}
