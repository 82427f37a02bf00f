//! Handlers for account endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::domain::log_event::{Actor, LogEvent};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /v0/user` (public)
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "correct horse" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the username is already taken.
pub async fn register_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(&payload.username, &payload.password)
        .await?;

    state.audit(
        Actor::Api,
        LogEvent::UserCreated {
            username: user.username.clone(),
        },
    );

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Returns the authenticated account.
///
/// # Endpoint
///
/// `GET /v0/user` (bearer-protected)
pub async fn current_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get(&current.username).await?;

    state.audit(
        Actor::user(&current.username),
        LogEvent::UserRead {
            username: current.username,
        },
    );

    Ok(Json(user.into()))
}

/// Changes the username and/or password of the authenticated account.
///
/// # Endpoint
///
/// `PATCH /v0/user` (bearer-protected)
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// ```json
/// { "username": "alice2", "password": "new password" }
/// ```
///
/// # Token Invalidation
///
/// Tokens name the account by username, so a username change invalidates
/// previously issued tokens; the client must authenticate again.
///
/// # Errors
///
/// Returns 400 Bad Request if no fields are provided or validation fails.
/// Returns 409 Conflict if the new username is taken.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .update(&current.username, payload.username, payload.password)
        .await?;

    state.audit(
        Actor::user(&current.username),
        LogEvent::UserUpdated {
            username: user.username.clone(),
        },
    );

    Ok(Json(user.into()))
}

/// Removes the authenticated account.
///
/// # Endpoint
///
/// `DELETE /v0/user` (bearer-protected)
///
/// # Errors
///
/// Returns 404 Not Found if the account vanished between authentication and
/// removal.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.user_service.remove(&current.username).await?;

    state.audit(
        Actor::user(&current.username),
        LogEvent::UserRemoved {
            username: current.username,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}
