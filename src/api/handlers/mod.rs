//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod resolve;
pub mod security;
pub mod user;

pub use health::health_handler;
pub use redirect::{
    create_redirect_handler, delete_redirect_handler, get_redirect_handler,
    list_redirects_handler, update_redirect_handler,
};
pub use resolve::resolve_handler;
pub use security::token_handler;
pub use user::{current_user_handler, delete_user_handler, register_user_handler, update_user_handler};
