//! Integration tests for report generation, plan gating and finalization.
//! The AI provider is replaced by a stub generator.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::{Method, StatusCode};
use common::{
    bearer_token, body_json, get, get_auth, post_json_auth, sample_report_json, send,
    StubGenerator,
};
use scidraft_core::plan::PLAN_PREMIUM;
use scidraft_db::repositories::{ReportRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a session with a manual and results owned by `user`.
async fn prepared_session(pool: &PgPool, user: Uuid) -> Uuid {
    let session_id = Uuid::new_v4();
    let token = bearer_token(user);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/manuals/upload",
        json!({
            "sessionId": session_id.to_string(),
            "text": "Measure the period of a simple pendulum for five lengths.",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/manuals/results",
        json!({ "sessionId": session_id.to_string(), "results": "L=0.5m T=1.42s" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    session_id
}

async fn generate(
    app: axum::Router,
    user: Uuid,
    session_id: Uuid,
) -> axum::http::Response<axum::body::Body> {
    post_json_auth(
        app,
        "/api/drafts/generate",
        json!({ "sessionId": session_id.to_string() }),
        &bearer_token(user),
    )
    .await
}

async fn finalize(
    app: axum::Router,
    user: Uuid,
    session_id: Uuid,
    content: serde_json::Value,
) -> axum::http::Response<axum::body::Body> {
    send(
        app,
        Method::PUT,
        &format!("/api/drafts/{session_id}/finalize"),
        Some(json!({ "content": content })),
        &[(AUTHORIZATION, format!("Bearer {}", bearer_token(user)))],
    )
    .await
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn generation_produces_a_draft(pool: PgPool) {
    let user = Uuid::new_v4();
    let session_id = prepared_session(&pool, user).await;
    let generator = StubGenerator::replying(&sample_report_json());

    let app = common::build_app_with(pool.clone(), generator.clone());
    let response = generate(app, user, session_id).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(
        json["data"]["title"],
        "Determination of g using a simple pendulum"
    );
    assert!(json["data"]["draft"]["aim"].is_string());
    assert_eq!(generator.calls(), 1);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/drafts/status/{session_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "draft");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn generation_requires_results(pool: PgPool) {
    let user = Uuid::new_v4();
    let session_id = Uuid::new_v4();

    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/manuals/upload",
        json!({ "sessionId": session_id.to_string(), "text": "A manual without results yet." }),
        &bearer_token(user),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = generate(app, user, session_id).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Experimental results are required before generating a report"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_session_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = generate(app, Uuid::new_v4(), Uuid::new_v4()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Session not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn free_plan_allows_one_report(pool: PgPool) {
    let user = Uuid::new_v4();
    let first = prepared_session(&pool, user).await;
    let second = prepared_session(&pool, user).await;

    let app = common::build_test_app(pool.clone());
    assert_eq!(generate(app, user, first).await.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = generate(app, user, second).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body_json(response).await["code"], "PAYMENT_REQUIRED");

    // Regenerating the same session does not consume another report.
    let app = common::build_test_app(pool.clone());
    assert_eq!(generate(app, user, first).await.status(), StatusCode::OK);

    UserRepo::set_plan(&pool, user, PLAN_PREMIUM).await.unwrap();
    let app = common::build_test_app(pool);
    assert_eq!(generate(app, user, second).await.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn generator_failure_marks_report_failed(pool: PgPool) {
    let user = Uuid::new_v4();
    let session_id = prepared_session(&pool, user).await;

    let app = common::build_app_with(pool.clone(), StubGenerator::failing());
    let response = generate(app, user, session_id).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "GENERATION_FAILED");
    assert_eq!(json["error"], "Report generation failed");

    let report = ReportRepo::find_by_session_id(&pool, session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.status, "failed");
    assert_eq!(report.error_message.as_deref(), Some("Report generation failed"));

    // A failed report does not count against the free plan.
    let app = common::build_test_app(pool);
    assert_eq!(generate(app, user, session_id).await.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_model_reply_is_a_generation_failure(pool: PgPool) {
    let user = Uuid::new_v4();
    let session_id = prepared_session(&pool, user).await;

    let app = common::build_app_with(pool.clone(), StubGenerator::replying("Sure! Here is your report."));
    let response = generate(app, user, session_id).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let status = ReportRepo::find_status(&pool, session_id).await.unwrap().unwrap();
    assert_eq!(status.status, "failed");
}

// ---------------------------------------------------------------------------
// Reading and finalizing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn drafts_are_private_to_their_owner(pool: PgPool) {
    let user = Uuid::new_v4();
    let session_id = prepared_session(&pool, user).await;
    let app = common::build_test_app(pool.clone());
    generate(app, user, session_id).await;

    let uri = format!("/api/drafts/{session_id}");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &bearer_token(user)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &bearer_token(Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn finalize_stores_result_and_completes(pool: PgPool) {
    let user = Uuid::new_v4();
    let session_id = prepared_session(&pool, user).await;
    let app = common::build_test_app(pool.clone());
    generate(app, user, session_id).await;

    let edited = json!({
        "title": "Pendulum lab (edited)",
        "conclusion": "g = 9.81 m/s^2 within error.",
    });
    let app = common::build_test_app(pool.clone());
    let response = finalize(app, user, session_id, edited.clone()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["result"], edited);

    // Completed reports can be finalized again.
    let app = common::build_test_app(pool);
    let response = finalize(app, user, session_id, edited).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn finalize_rejects_bad_content_and_failed_reports(pool: PgPool) {
    let user = Uuid::new_v4();
    let session_id = prepared_session(&pool, user).await;

    let app = common::build_app_with(pool.clone(), StubGenerator::failing());
    generate(app, user, session_id).await;

    let app = common::build_test_app(pool.clone());
    let response = finalize(app, user, session_id, json!("just a string")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = finalize(
        app,
        user,
        session_id,
        json!({ "title": "T", "aim": "A" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Cannot finalize a report in 'failed' state"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn my_reports_lists_only_my_reports(pool: PgPool) {
    let user = Uuid::new_v4();
    let session_id = prepared_session(&pool, user).await;
    let app = common::build_test_app(pool.clone());
    generate(app, user, session_id).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/reports", &bearer_token(user)).await).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["session_id"], session_id.to_string());

    let app = common::build_test_app(pool);
    let json =
        body_json(get_auth(app, "/api/reports", &bearer_token(Uuid::new_v4())).await).await;
    assert_eq!(json["data"]["total"], 0);
}
