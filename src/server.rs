//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, worker spawning, and Axum server lifecycle.

use crate::application::services::{AuthService, JwtService, RedirectService, UserService};
use crate::config::Config;
use crate::domain::log_worker::run_log_worker;
use crate::infrastructure::persistence::{
    SqliteLogRepository, SqliteRedirectRepository, SqliteUserRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Background audit log worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let redirect_repository = Arc::new(SqliteRedirectRepository::new(pool.clone()));
    let log_repository = Arc::new(SqliteLogRepository::new(pool.clone()));

    let (audit_tx, audit_rx) = mpsc::channel(config.log_queue_capacity);
    tokio::spawn(run_log_worker(audit_rx, log_repository));
    tracing::info!("Audit log worker started");

    let jwt = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.access_token_minutes,
    ));

    let state = AppState {
        user_service: Arc::new(UserService::new(user_repository.clone())),
        redirect_service: Arc::new(RedirectService::new(redirect_repository)),
        auth_service: Arc::new(AuthService::new(user_repository, jwt)),
        audit_sender: audit_tx,
    };

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves when Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
        return;
    }

    tracing::info!("Shutdown signal received");
}
