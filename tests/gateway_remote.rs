mod common;

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use snaplink::client::{Gateway, RemoteGateway};
use snaplink::domain::log_event::AuditEvent;
use snaplink::error::AppError;

/// Serves the full application router on an ephemeral port.
///
/// The audit receiver is returned so the channel stays open for the test's
/// lifetime (a closed channel degrades the health check).
async fn spawn_server(pool: SqlitePool) -> (String, mpsc::Receiver<AuditEvent>) {
    let (state, rx) = common::create_test_state(pool);
    let app = common::test_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), rx)
}

#[sqlx::test]
async fn test_remote_user_lifecycle(pool: SqlitePool) {
    let (base, _rx) = spawn_server(pool).await;

    let gw = RemoteGateway::new(&base, "alice".to_string(), "correct horse".to_string()).unwrap();

    // Registration is public, so it works before any login.
    let created = gw.create_user("alice", "correct horse").await.unwrap();
    assert_eq!(created.username, "alice");

    // First authorized call triggers the password flow.
    let shown = gw.show_user("alice").await.unwrap();
    assert_eq!(shown.id, created.id);

    gw.remove_user("alice").await.unwrap();
}

#[sqlx::test]
async fn test_remote_redirect_lifecycle(pool: SqlitePool) {
    let (base, _rx) = spawn_server(pool.clone()).await;
    common::create_test_user(&pool, "alice", "correct horse").await;

    let gw = RemoteGateway::new(&base, "alice".to_string(), "correct horse".to_string()).unwrap();

    let created = gw
        .add_redirect(
            Some("docs".to_string()),
            "https://example.com/docs".to_string(),
            Some(301),
            Some("moved".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(created.short_link, "docs");
    assert_eq!(created.response_status, 301);

    let (items, total) = gw.list_redirects(1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].short_link, "docs");

    let updated = gw
        .update_redirect(
            "docs",
            Some("https://example.com/new".to_string()),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(updated.url, "https://example.com/new");

    gw.remove_redirect("docs").await.unwrap();

    let result = gw.show_redirect("docs").await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_remote_propagates_error_envelope(pool: SqlitePool) {
    let (base, _rx) = spawn_server(pool.clone()).await;
    common::create_test_user(&pool, "alice", "correct horse").await;
    common::create_test_redirect(&pool, "docs", "https://example.com").await;

    let gw = RemoteGateway::new(&base, "alice".to_string(), "correct horse".to_string()).unwrap();

    let result = gw
        .add_redirect(
            Some("docs".to_string()),
            "https://other.com".to_string(),
            None,
            None,
        )
        .await;

    match result {
        Err(AppError::Conflict { message, .. }) => {
            assert!(message.contains("Short link"));
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[sqlx::test]
async fn test_remote_bad_credentials(pool: SqlitePool) {
    let (base, _rx) = spawn_server(pool.clone()).await;
    common::create_test_user(&pool, "alice", "correct horse").await;

    let gw = RemoteGateway::new(&base, "alice".to_string(), "wrong password".to_string()).unwrap();

    let result = gw.show_user("alice").await;
    assert!(matches!(result, Err(AppError::Unauthorized { .. })));
}

#[sqlx::test]
async fn test_remote_rejects_log_listing(pool: SqlitePool) {
    let (base, _rx) = spawn_server(pool).await;

    let gw = RemoteGateway::new(&base, "alice".to_string(), "correct horse".to_string()).unwrap();

    let result = gw.list_log(1, 10).await;
    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[sqlx::test]
async fn test_remote_check_hits_health(pool: SqlitePool) {
    let (base, _rx) = spawn_server(pool).await;

    let gw = RemoteGateway::new(&base, "alice".to_string(), "correct horse".to_string()).unwrap();

    let status = gw.check().await.unwrap();
    assert!(status.contains("healthy"));
}
