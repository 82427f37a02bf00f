//! Repository trait for redirect data access.

use crate::domain::entities::{NewRedirect, Redirect, RedirectPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short link redirects.
///
/// Provides CRUD operations for redirects, including lookup by short link
/// and pagination support.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteRedirectRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_redirect.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Creates a new redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short link already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_redirect: NewRedirect) -> Result<Redirect, AppError>;

    /// Finds a redirect by its short link.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Redirect))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short_link(&self, short_link: &str) -> Result<Option<Redirect>, AppError>;

    /// Lists redirects with pagination support.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<Redirect>, AppError>;

    /// Counts total redirects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Partially updates a redirect.
    ///
    /// Only fields present in [`RedirectPatch`] are modified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no redirect matches `short_link`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, short_link: &str, patch: RedirectPatch) -> Result<Redirect, AppError>;

    /// Deletes a redirect.
    ///
    /// Returns `Ok(true)` if the redirect existed and was removed,
    /// `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, short_link: &str) -> Result<bool, AppError>;
}
