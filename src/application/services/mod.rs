//! Business logic services for the application layer.

pub mod auth_service;
pub mod jwt_service;
pub mod redirect_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use jwt_service::{AccessClaims, IssuedToken, JwtService};
pub use redirect_service::RedirectService;
pub use user_service::UserService;
