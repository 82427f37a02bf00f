//! Handlers for redirect management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::{PaginationMeta, PaginationQuery};
use crate::api::dto::redirect::{
    CreateRedirectRequest, RedirectListResponse, RedirectResponse, UpdateRedirectRequest,
};
use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::RedirectPatch;
use crate::domain::log_event::{Actor, LogEvent};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new redirect.
///
/// # Endpoint
///
/// `POST /v0/redirect` (bearer-protected)
///
/// # Request Body
///
/// ```json
/// {
///   "short_link": "docs",               // optional, generated if absent
///   "url": "https://example.com/docs",
///   "response_status": 307,             // optional, one of 301/302/303/307/308
///   "body": ""                          // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the short link is already taken.
pub async fn create_redirect_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreateRedirectRequest>,
) -> Result<(StatusCode, Json<RedirectResponse>), AppError> {
    payload.validate()?;

    let redirect = state
        .redirect_service
        .create(
            payload.short_link,
            payload.url,
            payload.response_status,
            payload.body,
        )
        .await?;

    state.audit(
        Actor::user(&current.username),
        LogEvent::RedirectCreated {
            short_link: redirect.short_link.clone(),
            url: redirect.url.clone(),
        },
    );

    Ok((StatusCode::CREATED, Json(redirect.into())))
}

/// Lists redirects with pagination.
///
/// # Endpoint
///
/// `GET /v0/redirect?page=1&page_size=20` (bearer-protected)
pub async fn list_redirects_handler(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<RedirectListResponse>, AppError> {
    let (page, page_size) = query.sanitize();

    let (items, total) = state.redirect_service.list(page, page_size).await?;

    Ok(Json(RedirectListResponse {
        items: items.into_iter().map(Into::into).collect(),
        pagination: PaginationMeta {
            page,
            page_size,
            total,
        },
    }))
}

/// Fetches a single redirect.
///
/// # Endpoint
///
/// `GET /v0/redirect/{short_link}` (bearer-protected)
///
/// # Errors
///
/// Returns 404 Not Found if the redirect doesn't exist.
pub async fn get_redirect_handler(
    Path(short_link): Path<String>,
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<RedirectResponse>, AppError> {
    let redirect = state.redirect_service.get(&short_link).await?;

    state.audit(
        Actor::user(&current.username),
        LogEvent::RedirectRead {
            short_link: redirect.short_link.clone(),
        },
    );

    Ok(Json(redirect.into()))
}

/// Partially updates a redirect.
///
/// # Endpoint
///
/// `PATCH /v0/redirect/{short_link}` (bearer-protected)
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// ```json
/// {
///   "url": "https://new-destination.com",
///   "response_status": 301,
///   "body": "moved"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the redirect doesn't exist.
/// Returns 400 Bad Request if no fields are provided or validation fails.
pub async fn update_redirect_handler(
    Path(short_link): Path<String>,
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateRedirectRequest>,
) -> Result<Json<RedirectResponse>, AppError> {
    payload.validate()?;

    let patch = RedirectPatch {
        url: payload.url,
        response_status: payload.response_status,
        body: payload.body,
    };

    let redirect = state.redirect_service.update(&short_link, patch).await?;

    state.audit(
        Actor::user(&current.username),
        LogEvent::RedirectUpdated {
            short_link: redirect.short_link.clone(),
        },
    );

    Ok(Json(redirect.into()))
}

/// Removes a redirect.
///
/// # Endpoint
///
/// `DELETE /v0/redirect/{short_link}` (bearer-protected)
///
/// # Errors
///
/// Returns 404 Not Found if the redirect doesn't exist.
pub async fn delete_redirect_handler(
    Path(short_link): Path<String>,
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.redirect_service.remove(&short_link).await?;

    state.audit(
        Actor::user(&current.username),
        LogEvent::RedirectRemoved { short_link },
    );

    Ok(StatusCode::NO_CONTENT)
}
