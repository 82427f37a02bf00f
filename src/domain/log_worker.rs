//! Background worker persisting audit events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::log_event::AuditEvent;
use crate::domain::repositories::LogRepository;

/// Drains the audit channel and appends events to the log.
///
/// Transient database failures are retried with jittered exponential
/// backoff; an event that still fails after the final attempt is dropped
/// with an error log rather than blocking the queue.
///
/// The worker exits when all senders are dropped.
pub async fn run_log_worker<R: LogRepository>(
    mut rx: mpsc::Receiver<AuditEvent>,
    repository: Arc<R>,
) {
    while let Some(audit) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(3);

        let result = Retry::spawn(strategy, || async {
            repository.append(&audit.actor, &audit.event).await
        })
        .await;

        if let Err(e) = result {
            tracing::error!(error = %e, event = ?audit.event, "Dropping audit event after retries");
        }
    }

    tracing::info!("Audit log worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::log_event::{Actor, LogEvent};
    use crate::domain::repositories::MockLogRepository;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_worker_appends_received_events() {
        let mut mock_repo = MockLogRepository::new();

        mock_repo
            .expect_append()
            .withf(|actor, event| {
                *actor == Actor::Cli && matches!(event, LogEvent::UserCreated { username } if username == "alice")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_log_worker(rx, Arc::new(mock_repo)));

        tx.send(AuditEvent::new(
            Actor::Cli,
            LogEvent::UserCreated {
                username: "alice".to_string(),
            },
        ))
        .await
        .unwrap();

        drop(tx);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failures() {
        let mut mock_repo = MockLogRepository::new();

        let mut calls = 0;
        mock_repo.expect_append().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Err(AppError::internal("Database error", json!({})))
            } else {
                Ok(())
            }
        });

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_log_worker(rx, Arc::new(mock_repo)));

        tx.send(AuditEvent::new(
            Actor::Api,
            LogEvent::RedirectMatched {
                short_link: "docs".to_string(),
                url: "https://example.com".to_string(),
            },
        ))
        .await
        .unwrap();

        drop(tx);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_drops_event_after_exhausted_retries() {
        let mut mock_repo = MockLogRepository::new();

        // Initial attempt plus three retries.
        mock_repo
            .expect_append()
            .times(4)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_log_worker(rx, Arc::new(mock_repo)));

        tx.send(AuditEvent::new(
            Actor::Cli,
            LogEvent::RedirectRemoved {
                short_link: "gone".to_string(),
            },
        ))
        .await
        .unwrap();

        drop(tx);
        worker.await.unwrap();
    }
}
