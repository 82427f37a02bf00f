//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls, validation, and business rules. Services consume repository traits
//! and provide a clean API for HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - Registration and account management
//! - [`services::redirect_service::RedirectService`] - Redirect CRUD and matching
//! - [`services::auth_service::AuthService`] - Password login and bearer validation
//! - [`services::jwt_service::JwtService`] - Access token encoding/decoding

pub mod services;
