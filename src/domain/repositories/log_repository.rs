//! Repository trait for the append-only audit log.

use crate::domain::entities::LogEntry;
use crate::domain::log_event::{Actor, LogEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the audit log.
///
/// The log is append-only: rows are never updated or deleted, and no HTTP
/// surface exposes them. Reads exist for the local CLI only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLogRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_log.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Appends an event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn append(&self, actor: &Actor, event: &LogEvent) -> Result<(), AppError>;

    /// Lists log entries, newest first, with pagination support.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<LogEntry>, AppError>;

    /// Counts total log entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
