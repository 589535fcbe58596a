//! Integration tests for the session-keyed manual upsert.

use scidraft_db::models::manual::{UpsertManualSession, SOURCE_TEMPLATE, SOURCE_UPLOAD};
use scidraft_db::repositories::{ManualSessionRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn upload(session_id: Uuid, text: &str) -> UpsertManualSession {
    UpsertManualSession {
        session_id,
        user_id: None,
        template_id: None,
        source: SOURCE_UPLOAD,
        filename: Some("manual.pdf".to_string()),
        parsed_text: text.to_string(),
        practical_metadata: json!({}),
    }
}

#[sqlx::test]
async fn repeated_upserts_converge_to_one_row(pool: PgPool) {
    let session_id = Uuid::new_v4();

    let first = ManualSessionRepo::upsert(&pool, &upload(session_id, "first version of manual"))
        .await
        .unwrap()
        .expect("new session is written");
    let second = ManualSessionRepo::upsert(&pool, &upload(session_id, "second version of manual"))
        .await
        .unwrap()
        .expect("anonymous session is replaced");

    assert_eq!(first.id, second.id);
    assert_eq!(second.parsed_text, "second version of manual");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manual_sessions WHERE session_id = $1")
        .bind(session_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn concurrent_upserts_do_not_duplicate(pool: PgPool) {
    let session_id = Uuid::new_v4();
    let a = upload(session_id, "concurrent writer A");
    let b = upload(session_id, "concurrent writer B");

    let (ra, rb) = tokio::join!(
        ManualSessionRepo::upsert(&pool, &a),
        ManualSessionRepo::upsert(&pool, &b)
    );
    assert_eq!(ra.unwrap().unwrap().id, rb.unwrap().unwrap().id);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manual_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

async fn owned_session(pool: &PgPool, session_id: Uuid) -> Uuid {
    let user_id = Uuid::new_v4();
    UserRepo::ensure(pool, user_id, Some("student@uni.test")).await.unwrap();
    let mut owned = upload(session_id, "owned manual text");
    owned.user_id = Some(user_id);
    ManualSessionRepo::upsert(pool, &owned)
        .await
        .unwrap()
        .expect("new session is written");
    user_id
}

#[sqlx::test]
async fn owner_reimport_keeps_results(pool: PgPool) {
    let session_id = Uuid::new_v4();
    let user_id = owned_session(&pool, session_id).await;
    ManualSessionRepo::set_results(&pool, session_id, "T = 2.0 s")
        .await
        .unwrap()
        .expect("session exists");

    let mut reimport = upload(session_id, "template manual text");
    reimport.source = SOURCE_TEMPLATE;
    reimport.user_id = Some(user_id);
    let row = ManualSessionRepo::upsert(&pool, &reimport)
        .await
        .unwrap()
        .expect("owner may replace the manual");

    assert_eq!(row.user_id, Some(user_id));
    assert_eq!(row.source, SOURCE_TEMPLATE);
    assert_eq!(row.parsed_text, "template manual text");
    assert_eq!(row.results_text.as_deref(), Some("T = 2.0 s"));
}

#[sqlx::test]
async fn owned_session_rejects_other_writers(pool: PgPool) {
    let session_id = Uuid::new_v4();
    let owner = owned_session(&pool, session_id).await;

    let anonymous = upload(session_id, "anonymous replacement");
    assert!(ManualSessionRepo::upsert(&pool, &anonymous)
        .await
        .unwrap()
        .is_none());

    let other_user = Uuid::new_v4();
    UserRepo::ensure(&pool, other_user, Some("other@uni.test")).await.unwrap();
    let mut foreign = upload(session_id, "foreign replacement");
    foreign.user_id = Some(other_user);
    assert!(ManualSessionRepo::upsert(&pool, &foreign)
        .await
        .unwrap()
        .is_none());

    let row = ManualSessionRepo::find_by_session_id(&pool, session_id)
        .await
        .unwrap()
        .expect("session exists");
    assert_eq!(row.user_id, Some(owner));
    assert_eq!(row.parsed_text, "owned manual text");
}

#[sqlx::test]
async fn anonymous_session_is_claimed_by_first_user(pool: PgPool) {
    let session_id = Uuid::new_v4();
    ManualSessionRepo::upsert(&pool, &upload(session_id, "anonymous manual text"))
        .await
        .unwrap()
        .expect("new session is written");

    let user_id = Uuid::new_v4();
    UserRepo::ensure(&pool, user_id, Some("student@uni.test")).await.unwrap();
    let mut claim = upload(session_id, "signed-in manual text");
    claim.user_id = Some(user_id);
    let row = ManualSessionRepo::upsert(&pool, &claim)
        .await
        .unwrap()
        .expect("anonymous session can be claimed");
    assert_eq!(row.user_id, Some(user_id));
}

#[sqlx::test]
async fn results_for_unknown_session_return_none(pool: PgPool) {
    let row = ManualSessionRepo::set_results(&pool, Uuid::new_v4(), "data")
        .await
        .unwrap();
    assert!(row.is_none());
    assert!(ManualSessionRepo::find_by_session_id(&pool, Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}
