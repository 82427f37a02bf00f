mod common;

use axum_test::TestServer;
use sqlx::SqlitePool;

#[sqlx::test]
async fn test_health_reports_healthy(pool: SqlitePool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["audit_queue"]["status"], "ok");
    assert!(json["version"].is_string());
}

#[sqlx::test]
async fn test_health_degraded_when_audit_queue_closed(pool: SqlitePool) {
    let (state, rx) = common::create_test_state(pool);

    // Dropping the receiver closes the channel.
    drop(rx);

    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["audit_queue"]["status"], "error");
}
