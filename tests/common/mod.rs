#![allow(dead_code)]

use axum::routing::get;
use axum::{Router, middleware};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::mpsc;

use snaplink::api::handlers::{health_handler, resolve_handler};
use snaplink::api::middleware::auth;
use snaplink::application::services::{AuthService, JwtService, RedirectService, UserService};
use snaplink::domain::log_event::AuditEvent;
use snaplink::infrastructure::persistence::{SqliteRedirectRepository, SqliteUserRepository};
use snaplink::state::AppState;
use snaplink::utils::password::hash_password;

pub const TEST_JWT_SECRET: &str = "test-signing-secret";

pub async fn create_test_user(pool: &SqlitePool, username: &str, password: &str) -> i64 {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar(
        "INSERT INTO users (username, hashed_password, created_at) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(username)
    .bind(hashed)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_redirect(pool: &SqlitePool, short_link: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO redirects (short_link, url, response_status, body, created_at)
         VALUES (?, ?, 307, '', ?) RETURNING id",
    )
    .bind(short_link)
    .bind(url)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_redirect_full(
    pool: &SqlitePool,
    short_link: &str,
    url: &str,
    response_status: u16,
    body: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO redirects (short_link, url, response_status, body, created_at)
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(short_link)
    .bind(url)
    .bind(response_status)
    .bind(body)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Issues a bearer token the test state will accept.
pub fn test_token(username: &str) -> String {
    JwtService::new(TEST_JWT_SECRET, 30)
        .issue(username)
        .unwrap()
        .access_token
}

pub fn create_test_state(pool: SqlitePool) -> (AppState, mpsc::Receiver<AuditEvent>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let redirect_repo = Arc::new(SqliteRedirectRepository::new(pool));

    let jwt = Arc::new(JwtService::new(TEST_JWT_SECRET, 30));

    let state = AppState {
        user_service: Arc::new(UserService::new(user_repo.clone())),
        redirect_service: Arc::new(RedirectService::new(redirect_repo)),
        auth_service: Arc::new(AuthService::new(user_repo, jwt)),
        audit_sender: tx,
    };

    (state, rx)
}

/// Full application router without rate limiting, suitable for `TestServer`.
pub fn test_app(state: AppState) -> Router {
    let protected = snaplink::api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let v0_router = snaplink::api::routes::public_routes().merge(protected);

    Router::new()
        .route("/{short_link}", get(resolve_handler))
        .route("/health", get(health_handler))
        .nest("/v0", v0_router)
        .with_state(state)
}
