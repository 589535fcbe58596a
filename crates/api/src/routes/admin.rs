//! Route definitions for the `/admin` back-office.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    admin_accounts, admin_feedback, admin_notifications, admin_payments, admin_reports,
    admin_session, admin_stats, admin_templates, admin_users,
};
use crate::middleware::admin_session::require_admin_session;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// `login` and `logout` are public; every other route sits behind
/// [`require_admin_session`] and checks its minimum role in the handler.
///
/// ```text
/// POST   /login                     -> login (public)
/// POST   /logout                    -> logout (public)
/// GET    /session                   -> current_session
///
/// GET    /stats                     -> dashboard (moderator)
///
/// GET    /users                     -> list_users (moderator)
/// GET    /users/{id}                -> get_user (moderator)
/// PUT    /users/{id}                -> update_user (admin)
/// DELETE /users/{id}                -> delete_user (super_admin)
///
/// GET    /reports                   -> list_reports (moderator)
/// GET    /reports/{id}              -> get_report (moderator)
/// DELETE /reports/{id}              -> delete_report (admin)
/// PUT    /reports/{id}/status       -> update_report_status (admin)
///
/// GET    /payments                  -> list_payments (admin)
/// PUT    /payments/{id}/status      -> update_payment_status (admin)
///
/// GET    /feedback                  -> list_feedback (moderator)
/// DELETE /feedback/{id}             -> delete_feedback (admin)
///
/// GET    /notifications             -> list_notifications (moderator)
/// POST   /notifications             -> create_notification (admin)
/// DELETE /notifications/{id}        -> delete_notification (admin)
///
/// GET    /templates                 -> list_templates (admin)
/// POST   /templates                 -> create_template (admin)
/// PUT    /templates/{id}            -> update_template (admin)
/// DELETE /templates/{id}            -> delete_template (admin)
///
/// GET    /admins                    -> list_admins (super_admin)
/// POST   /admins                    -> create_admin (super_admin)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/session", get(admin_session::current_session))
        .route("/stats", get(admin_stats::dashboard))
        // Users
        .route("/users", get(admin_users::list_users))
        .route(
            "/users/{id}",
            get(admin_users::get_user)
                .put(admin_users::update_user)
                .delete(admin_users::delete_user),
        )
        // Reports
        .route("/reports", get(admin_reports::list_reports))
        .route(
            "/reports/{id}",
            get(admin_reports::get_report).delete(admin_reports::delete_report),
        )
        .route(
            "/reports/{id}/status",
            put(admin_reports::update_report_status),
        )
        // Payments
        .route("/payments", get(admin_payments::list_payments))
        .route(
            "/payments/{id}/status",
            put(admin_payments::update_payment_status),
        )
        // Feedback
        .route("/feedback", get(admin_feedback::list_feedback))
        .route(
            "/feedback/{id}",
            axum::routing::delete(admin_feedback::delete_feedback),
        )
        // Notifications
        .route(
            "/notifications",
            get(admin_notifications::list_notifications)
                .post(admin_notifications::create_notification),
        )
        .route(
            "/notifications/{id}",
            axum::routing::delete(admin_notifications::delete_notification),
        )
        // Templates
        .route(
            "/templates",
            get(admin_templates::list_templates).post(admin_templates::create_template),
        )
        .route(
            "/templates/{id}",
            put(admin_templates::update_template).delete(admin_templates::delete_template),
        )
        // Admin accounts
        .route(
            "/admins",
            get(admin_accounts::list_admins).post(admin_accounts::create_admin),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin_session));

    Router::new()
        .route("/login", post(admin_session::login))
        .route("/logout", post(admin_session::logout))
        .merge(protected)
}
