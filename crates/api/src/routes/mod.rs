pub mod account;
pub mod admin;
pub mod auth;
pub mod drafts;
pub mod health;
pub mod manuals;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login, /auth/register, /auth/logout        501 stubs
///
/// /templates                                       published catalogue
/// /templates/{id}                                  one template
///
/// /manuals/import-template                         template -> session (POST)
/// /manuals/upload                                  uploaded text -> session (POST)
/// /manuals/results                                 attach results (POST)
/// /manuals/status/{session_id}                     manual row
///
/// /drafts/generate                                 AI generation (POST, auth)
/// /drafts/status/{session_id}                      report status
/// /drafts/{session_id}                             report (auth, owner)
/// /drafts/{session_id}/finalize                    finalize (PUT, auth, owner)
///
/// /reports                                         my reports (auth)
/// /payments                                        my payments, create (auth)
/// /feedback                                        submit (auth optional)
/// /notifications                                   my notifications (auth)
/// /notifications/{id}/read                         mark read (POST, auth)
///
/// /admin/...                                       back-office, see routes::admin
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/templates", templates::router())
        .nest("/manuals", manuals::router())
        .nest("/drafts", drafts::router())
        .nest("/reports", account::reports_router())
        .nest("/payments", account::payments_router())
        .nest("/feedback", account::feedback_router())
        .nest("/notifications", account::notifications_router())
        .nest("/admin", admin::router(state))
}
