//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-bound parameters.
//!
//! # Repositories
//!
//! - [`SqliteUserRepository`] - Account storage and retrieval
//! - [`SqliteRedirectRepository`] - Redirect storage and retrieval
//! - [`SqliteLogRepository`] - Append-only audit log

pub mod sqlite_log_repository;
pub mod sqlite_redirect_repository;
pub mod sqlite_user_repository;

pub use sqlite_log_repository::SqliteLogRepository;
pub use sqlite_redirect_repository::SqliteRedirectRepository;
pub use sqlite_user_repository::SqliteUserRepository;
