//! HTTP behaviour that does not need a database: routing fallbacks, the
//! auth stubs, bearer-token rejection and the admin session guard.
//!
//! All requests here are answered before any query runs, so the app uses a
//! pool that never connects.

mod common;

use assert_matches::assert_matches;
use axum::http::header::{ALLOW, SET_COOKIE};
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{
    admin_cookie, bearer_token_issued_at, body_json, get, get_admin, get_auth, lazy_pool,
    post_json, send, send_admin,
};
use scidraft_core::roles::AdminRole;
use uuid::Uuid;

fn app() -> axum::Router {
    common::build_test_app(lazy_pool())
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let response = get(app(), "/api/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn wrong_method_returns_json_405_with_allow_header() {
    let response = get(app(), "/api/manuals/import-template").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().contains_key(ALLOW));
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn body_missing_a_field_is_400_envelope() {
    let response = post_json(app(), "/api/manuals/upload", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("text"));
}

#[tokio::test]
async fn missing_json_body_is_400_envelope() {
    let response = send(app(), Method::POST, "/api/feedback", None, &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_path_id_is_400_envelope() {
    let cookie = admin_cookie("root@scidraft.test", AdminRole::SuperAdmin, Utc::now());

    let response = get_admin(app(), "/api/admin/users/not-a-uuid", &cookie).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_query_is_400_envelope() {
    let cookie = admin_cookie("root@scidraft.test", AdminRole::SuperAdmin, Utc::now());

    let response = get_admin(app(), "/api/admin/users?page=first", &cookie).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = get(app(), "/api/does-not-exist").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let response = get(app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// Auth stubs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn student_auth_endpoints_are_not_implemented() {
    for path in ["/api/auth/login", "/api/auth/register", "/api/auth/logout"] {
        let response = post_json(app(), path, serde_json::json!({})).await;

        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED, "{path}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "Authentication is handled by the identity provider"
        );
    }
}

// ---------------------------------------------------------------------------
// Status endpoints with malformed ids
// ---------------------------------------------------------------------------

#[tokio::test]
async fn manual_status_with_malformed_id_is_404() {
    let response = get(app(), "/api/manuals/status/not-a-uuid").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Session not found");
}

#[tokio::test]
async fn draft_status_with_malformed_id_is_404() {
    let response = get(app(), "/api/drafts/status/12345").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Report not found");
}

// ---------------------------------------------------------------------------
// Student bearer tokens
// ---------------------------------------------------------------------------

#[tokio::test]
async fn owner_endpoint_without_token_is_401() {
    let response = get(app(), "/api/reports").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn token_older_than_session_window_is_rejected() {
    let issued = (Utc::now() - Duration::minutes(31)).timestamp();
    let token = bearer_token_issued_at(Uuid::new_v4(), issued);

    let response = get_auth(app(), "/api/reports", &token).await;

    // `exp` has passed as well, so either message is acceptable.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_matches!(
        json["error"].as_str(),
        Some("Session expired") | Some("Invalid or expired token")
    );
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let response = get_auth(app(), "/api/payments", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Admin session guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_route_without_cookie_is_401() {
    let response = get(app(), "/api/admin/stats").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!response.headers().contains_key(SET_COOKIE));
    let json = body_json(response).await;
    assert_eq!(json["error"], "No admin session");
}

#[tokio::test]
async fn expired_admin_session_is_401_and_cleared() {
    let cookie = admin_cookie(
        "ops@scidraft.test",
        AdminRole::SuperAdmin,
        Utc::now() - Duration::minutes(3),
    );

    let response = get_admin(app(), "/api/admin/stats", &cookie).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("admin-session=;"));
    assert!(set_cookie.contains("Max-Age=0"));
    let json = body_json(response).await;
    assert_eq!(json["error"], "Admin session expired");
}

#[tokio::test]
async fn forged_admin_cookie_is_rejected() {
    let cookie = admin_cookie("ops@scidraft.test", AdminRole::SuperAdmin, Utc::now());
    // Drop the signature.
    let unsigned = cookie.split('.').next().unwrap().to_string();

    let response = get_admin(app(), "/api/admin/session", &unsigned).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid admin session");
}

#[tokio::test]
async fn admin_role_on_super_admin_endpoint_is_403() {
    let cookie = admin_cookie("admin@scidraft.test", AdminRole::Admin, Utc::now());

    let response = get_admin(app(), "/api/admin/admins", &cookie).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "super_admin role required");
}

#[tokio::test]
async fn moderator_cannot_edit_users() {
    let cookie = admin_cookie("mod@scidraft.test", AdminRole::Moderator, Utc::now());
    let uri = format!("/api/admin/users/{}", Uuid::new_v4());

    let response = send_admin(
        app(),
        Method::PUT,
        &uri,
        Some(serde_json::json!({ "plan": "premium" })),
        &cookie,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn valid_admin_session_is_refreshed() {
    let cookie = admin_cookie(
        "mod@scidraft.test",
        AdminRole::Moderator,
        Utc::now() - Duration::seconds(90),
    );

    let response = get_admin(app(), "/api/admin/session", &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("admin-session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "mod@scidraft.test");
    assert_eq!(json["data"]["role"], "moderator");
}

#[tokio::test]
async fn admin_logout_clears_cookie_without_session() {
    let response = send_admin(app(), Method::POST, "/api/admin/logout", None, "").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}
