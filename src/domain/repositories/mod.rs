//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account CRUD operations
//! - [`RedirectRepository`] - Short link CRUD operations
//! - [`LogRepository`] - Append-only audit log
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod log_repository;
pub mod redirect_repository;
pub mod user_repository;

pub use log_repository::LogRepository;
pub use redirect_repository::RedirectRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use log_repository::MockLogRepository;
#[cfg(test)]
pub use redirect_repository::MockRedirectRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
