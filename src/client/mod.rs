//! CLI gateway over local database or remote HTTP access.
//!
//! The [`Gateway`] trait is the single create/read/update/delete surface the
//! CLI is written against. Two implementations exist:
//!
//! - [`LocalGateway`] - operates directly on the SQLite database through the
//!   same services the server uses, writing audit entries with actor `cli`
//! - [`RemoteGateway`] - operates against a running server over HTTP,
//!   authenticating with the password flow and transparently
//!   re-authenticating once on 401 under a mutex
//!
//! Both backends return the API DTO types, so CLI commands render identical
//! output regardless of where the data came from.

pub mod local;
pub mod remote;

pub use local::LocalGateway;
pub use remote::RemoteGateway;

use async_trait::async_trait;

use crate::api::dto::redirect::RedirectResponse;
use crate::api::dto::user::UserResponse;
use crate::domain::entities::LogEntry;
use crate::error::AppError;

/// One CRUD surface for CLI commands, parameterized over resource access
/// (database session vs. HTTP client).
///
/// Operations unavailable on a backend (log listing over HTTP, foreign
/// accounts over HTTP) return [`AppError::Validation`] describing the
/// restriction instead of panicking or silently no-opping.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Registers a new account.
    async fn create_user(&self, username: &str, password: &str) -> Result<UserResponse, AppError>;

    /// Fetches an account.
    ///
    /// The remote backend can only fetch the account it authenticates as.
    async fn show_user(&self, username: &str) -> Result<UserResponse, AppError>;

    /// Changes the username and/or password of an account.
    async fn update_user(
        &self,
        username: &str,
        new_username: Option<String>,
        new_password: Option<String>,
    ) -> Result<UserResponse, AppError>;

    /// Removes an account.
    async fn remove_user(&self, username: &str) -> Result<(), AppError>;

    /// Registers a redirect. A missing `short_link` is generated.
    async fn add_redirect(
        &self,
        short_link: Option<String>,
        url: String,
        response_status: Option<u16>,
        body: Option<String>,
    ) -> Result<RedirectResponse, AppError>;

    /// Lists redirects, returning the page and the total count.
    async fn list_redirects(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<RedirectResponse>, i64), AppError>;

    /// Fetches a redirect.
    async fn show_redirect(&self, short_link: &str) -> Result<RedirectResponse, AppError>;

    /// Partially updates a redirect.
    async fn update_redirect(
        &self,
        short_link: &str,
        url: Option<String>,
        response_status: Option<u16>,
        body: Option<String>,
    ) -> Result<RedirectResponse, AppError>;

    /// Removes a redirect.
    async fn remove_redirect(&self, short_link: &str) -> Result<(), AppError>;

    /// Lists audit log entries, newest first. Local backend only.
    async fn list_log(&self, page: i64, page_size: i64)
    -> Result<(Vec<LogEntry>, i64), AppError>;

    /// Verifies the backend is reachable, returning a short status line.
    async fn check(&self) -> Result<String, AppError>;
}
