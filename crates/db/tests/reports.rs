//! Integration tests for report generation bookkeeping.

use scidraft_core::report::{STATUS_DRAFT, STATUS_FAILED, STATUS_GENERATING};
use scidraft_db::models::report::StartGeneration;
use scidraft_db::repositories::{ReportRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

async fn student(pool: &PgPool, email: &str) -> Uuid {
    let id = Uuid::new_v4();
    UserRepo::ensure(pool, id, Some(email)).await.unwrap();
    id
}

fn start(session_id: Uuid, user_id: Uuid) -> StartGeneration {
    StartGeneration {
        session_id,
        user_id,
        practical_id: Some("abc123".to_string()),
        title: None,
    }
}

#[sqlx::test]
async fn second_start_while_generating_is_refused(pool: PgPool) {
    let user = student(&pool, "a@uni.test").await;
    let session_id = Uuid::new_v4();

    let report = ReportRepo::start_generation(&pool, &start(session_id, user))
        .await
        .unwrap()
        .expect("first start creates the row");
    assert_eq!(report.status, STATUS_GENERATING);

    let again = ReportRepo::start_generation(&pool, &start(session_id, user))
        .await
        .unwrap();
    assert!(again.is_none());
}

#[sqlx::test]
async fn other_users_cannot_take_over_a_session(pool: PgPool) {
    let owner = student(&pool, "owner@uni.test").await;
    let intruder = student(&pool, "intruder@uni.test").await;
    let session_id = Uuid::new_v4();

    let report = ReportRepo::start_generation(&pool, &start(session_id, owner))
        .await
        .unwrap()
        .unwrap();
    ReportRepo::mark_draft(&pool, report.id, Some("Pendulum"), &json!({"title": "Pendulum"}))
        .await
        .unwrap();

    let taken = ReportRepo::start_generation(&pool, &start(session_id, intruder))
        .await
        .unwrap();
    assert!(taken.is_none());

    let stored = ReportRepo::find_by_session_id(&pool, session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id, Some(owner));
    assert_eq!(stored.status, STATUS_DRAFT);
}

#[sqlx::test]
async fn billable_count_excludes_current_session(pool: PgPool) {
    let user = student(&pool, "count@uni.test").await;
    let session_id = Uuid::new_v4();

    let report = ReportRepo::start_generation(&pool, &start(session_id, user))
        .await
        .unwrap()
        .unwrap();
    ReportRepo::mark_draft(&pool, report.id, None, &json!({"title": "T"}))
        .await
        .unwrap();

    assert_eq!(
        ReportRepo::count_billable_for_user(&pool, user, session_id).await.unwrap(),
        0
    );
    assert_eq!(
        ReportRepo::count_billable_for_user(&pool, user, Uuid::new_v4()).await.unwrap(),
        1
    );
}

#[sqlx::test]
async fn status_projection_for_missing_session_is_none(pool: PgPool) {
    assert!(ReportRepo::find_status(&pool, Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn status_override_requires_expected_status(pool: PgPool) {
    let user = student(&pool, "override@uni.test").await;
    let report = ReportRepo::start_generation(&pool, &start(Uuid::new_v4(), user))
        .await
        .unwrap()
        .expect("first start creates the row");

    let stale = ReportRepo::update_status(&pool, report.id, STATUS_DRAFT, STATUS_FAILED)
        .await
        .unwrap();
    assert!(stale.is_none());

    let updated = ReportRepo::update_status(&pool, report.id, STATUS_GENERATING, STATUS_FAILED)
        .await
        .unwrap()
        .expect("expected status matches");
    assert_eq!(updated.status, STATUS_FAILED);
}
