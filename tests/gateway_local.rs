use snaplink::client::{Gateway, LocalGateway};
use snaplink::domain::log_event::{Actor, LogEvent};
use snaplink::error::AppError;

async fn gateway() -> LocalGateway {
    LocalGateway::connect("sqlite::memory:").await.unwrap()
}

#[tokio::test]
async fn test_user_lifecycle() {
    let gw = gateway().await;

    let created = gw.create_user("alice", "correct horse").await.unwrap();
    assert_eq!(created.username, "alice");

    let shown = gw.show_user("alice").await.unwrap();
    assert_eq!(shown.id, created.id);

    let updated = gw
        .update_user("alice", Some("alice2".to_string()), None)
        .await
        .unwrap();
    assert_eq!(updated.username, "alice2");

    gw.remove_user("alice2").await.unwrap();

    let result = gw.show_user("alice2").await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_user_validation_matches_server_rules() {
    let gw = gateway().await;

    let result = gw.create_user("ab", "correct horse").await;
    assert!(matches!(result, Err(AppError::Validation { .. })));

    let result = gw.create_user("alice", "short").await;
    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[tokio::test]
async fn test_redirect_lifecycle() {
    let gw = gateway().await;

    let created = gw
        .add_redirect(
            Some("docs".to_string()),
            "https://example.com/docs".to_string(),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(created.short_link, "docs");
    assert_eq!(created.response_status, 307);

    let (items, total) = gw.list_redirects(1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].short_link, "docs");

    let updated = gw
        .update_redirect("docs", None, Some(301), Some("moved".to_string()))
        .await
        .unwrap();
    assert_eq!(updated.response_status, 301);
    assert_eq!(updated.body, "moved");

    gw.remove_redirect("docs").await.unwrap();

    let result = gw.show_redirect("docs").await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_generated_short_link() {
    let gw = gateway().await;

    let created = gw
        .add_redirect(None, "https://example.com".to_string(), None, None)
        .await
        .unwrap();

    assert_eq!(created.short_link.len(), 12);
}

#[tokio::test]
async fn test_operations_are_logged_with_cli_actor() {
    let gw = gateway().await;

    gw.create_user("alice", "correct horse").await.unwrap();
    gw.add_redirect(
        Some("docs".to_string()),
        "https://example.com/docs".to_string(),
        None,
        None,
    )
    .await
    .unwrap();
    gw.remove_redirect("docs").await.unwrap();

    let (entries, total) = gw.list_log(1, 10).await.unwrap();
    assert_eq!(total, 3);

    for entry in &entries {
        assert_eq!(entry.actor, Actor::Cli);
    }

    // Newest first.
    assert!(matches!(
        entries[0].event,
        LogEvent::RedirectRemoved { .. }
    ));
    assert!(matches!(entries[2].event, LogEvent::UserCreated { .. }));
}

#[tokio::test]
async fn test_check_reports_status() {
    let gw = gateway().await;

    let status = gw.check().await.unwrap();
    assert!(status.contains("OK"));
}
