mod common;

use axum_test::TestServer;
use sqlx::SqlitePool;

use snaplink::domain::log_event::{Actor, LogEvent};

#[sqlx::test]
async fn test_resolve_serves_stored_redirect(pool: SqlitePool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    common::create_test_redirect(&pool, "docs", "https://example.com/docs").await;

    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/docs").await;

    response.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "https://example.com/docs"
    );
}

#[sqlx::test]
async fn test_resolve_uses_stored_status_and_body(pool: SqlitePool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    common::create_test_redirect_full(
        &pool,
        "moved",
        "https://example.com/new-home",
        301,
        "moved permanently",
    )
    .await;

    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/moved").await;

    response.assert_status(axum::http::StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "https://example.com/new-home"
    );
    assert_eq!(response.text(), "moved permanently");
}

#[sqlx::test]
async fn test_resolve_unknown_short_link(pool: SqlitePool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/missing").await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_resolve_emits_match_event(pool: SqlitePool) {
    let (state, mut rx) = common::create_test_state(pool.clone());
    common::create_test_redirect(&pool, "docs", "https://example.com/docs").await;

    let server = TestServer::new(common::test_app(state)).unwrap();

    server.get("/docs").await.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);

    let audit = rx.try_recv().expect("expected an audit event");
    assert_eq!(audit.actor, Actor::Api);
    assert_eq!(
        audit.event,
        LogEvent::RedirectMatched {
            short_link: "docs".to_string(),
            url: "https://example.com/docs".to_string(),
        }
    );
}
