//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use scidraft_api::error::{AppError, GENERATION_FAILED_MESSAGE};
use scidraft_core::error::CoreError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn every_error_carries_success_false() {
    let (_, json) = error_to_response(AppError::BadRequest("x".into())).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn not_found_message_is_passed_through() {
    let (status, json) = error_to_response(AppError::NotFound("Session not found".into())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Session not found");
}

#[tokio::test]
async fn core_not_found_names_the_entity() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Report",
        id: "42".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Report with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Rating must be between 1 and 5".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Rating must be between 1 and 5");
}

#[tokio::test]
async fn payment_required_returns_402() {
    let err = AppError::Core(CoreError::PaymentRequired("Upgrade to premium".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(json["code"], "PAYMENT_REQUIRED");
}

#[tokio::test]
async fn forbidden_and_unauthorized_are_distinct() {
    let (forbidden, _) =
        error_to_response(AppError::Core(CoreError::Forbidden("no".into()))).await;
    let (unauthorized, _) =
        error_to_response(AppError::Core(CoreError::Unauthorized("who".into()))).await;

    assert_eq!(forbidden, StatusCode::FORBIDDEN);
    assert_eq!(unauthorized, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn conflict_returns_409() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Conflict("already exists".into()))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn generation_failure_hides_details() {
    let err = AppError::GenerationFailed("provider returned 503: upstream overloaded".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "GENERATION_FAILED");
    assert_eq!(json["error"], GENERATION_FAILED_MESSAGE);
}

#[tokio::test]
async fn not_implemented_returns_501() {
    let (status, json) =
        error_to_response(AppError::NotImplemented("Handled elsewhere".into())).await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(json["code"], "NOT_IMPLEMENTED");
    assert_eq!(json["error"], "Handled elsewhere");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, _) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pool_errors_are_sanitized() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
