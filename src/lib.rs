//! # snaplink
//!
//! A URL shortener service with user accounts, JWT authentication, and an
//! append-only audit log, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Business logic and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Client Layer** ([`client`]) - CLI gateway over local database or remote HTTP
//!
//! ## Features
//!
//! - Account registration with Argon2id password hashing
//! - JWT bearer tokens via an OAuth2-style password flow
//! - Redirects with configurable status code and response body
//! - Append-only audit log written by a background worker
//! - CLI operating locally or against a running server
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export JWT_SECRET="change-me"
//! export DATABASE_URL="sqlite://snaplink.db?mode=rwc"  # Optional
//!
//! # Start the service (migrations run automatically)
//! cargo run
//!
//! # Manage it from a second terminal
//! cargo run --bin snapctl -- local user create --username admin
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, JwtService, RedirectService, UserService};
    pub use crate::domain::entities::{NewRedirect, NewUser, Redirect, User};
    pub use crate::domain::log_event::{Actor, LogEvent};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
