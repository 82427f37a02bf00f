//! SQLite implementation of the audit log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::LogEntry;
use crate::domain::log_event::{Actor, LogEvent};
use crate::domain::repositories::LogRepository;
use crate::error::AppError;

/// SQLite repository for the append-only audit log.
///
/// Actor and event payloads are stored as JSON text columns.
pub struct SqliteLogRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LogRow {
    id: i64,
    actor: String,
    event: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LogRow> for LogEntry {
    type Error = AppError;

    fn try_from(row: LogRow) -> Result<Self, AppError> {
        let actor: Actor = serde_json::from_str(&row.actor)
            .map_err(|e| decode_error("actor", row.id, &e.to_string()))?;
        let event: LogEvent = serde_json::from_str(&row.event)
            .map_err(|e| decode_error("event", row.id, &e.to_string()))?;

        Ok(LogEntry {
            id: row.id,
            actor,
            event,
            created_at: row.created_at,
        })
    }
}

fn decode_error(column: &str, id: i64, reason: &str) -> AppError {
    tracing::error!(column, id, reason, "Malformed audit log row");
    AppError::internal(
        "Malformed audit log row",
        json!({ "column": column, "id": id }),
    )
}

#[async_trait]
impl LogRepository for SqliteLogRepository {
    async fn append(&self, actor: &Actor, event: &LogEvent) -> Result<(), AppError> {
        let actor_json = serde_json::to_string(actor)
            .map_err(|e| AppError::internal("Failed to encode actor", json!({ "reason": e.to_string() })))?;
        let event_json = serde_json::to_string(event)
            .map_err(|e| AppError::internal("Failed to encode event", json!({ "reason": e.to_string() })))?;

        sqlx::query("INSERT INTO logs (actor, event, created_at) VALUES (?, ?, ?)")
            .bind(actor_json)
            .bind(event_json)
            .bind(Utc::now())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<LogEntry>, AppError> {
        let offset = (page - 1) * page_size;

        let rows = sqlx::query_as::<_, LogRow>(
            r#"
            SELECT id, actor, event, created_at FROM logs
            ORDER BY id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM logs")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count.0)
    }
}
