//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_link}`  - Short link resolution (public)
//! - `GET  /health`        - Health check: DB, audit queue (public)
//! - `/v0/user`, `/v0/security/token` - Registration and login (public)
//! - `/v0/*`               - Account and redirect management (Bearer token)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token on protected `/v0` routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, resolve_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket
///   address; enable only when the service runs behind a trusted reverse
///   proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let protected = if behind_proxy {
        protected.layer(rate_limit::proxied_secure_layer())
    } else {
        protected.layer(rate_limit::secure_layer())
    };

    let public = api::routes::public_routes();
    let public = if behind_proxy {
        public.layer(rate_limit::proxied_layer())
    } else {
        public.layer(rate_limit::layer())
    };

    let v0_router = Router::new().merge(public).merge(protected);

    let router = Router::new()
        .route("/{short_link}", get(resolve_handler))
        .route("/health", get(health_handler))
        .nest("/v0", v0_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
