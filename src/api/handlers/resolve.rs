//! Handler for public short link resolution.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::domain::log_event::{Actor, LogEvent};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short link and serves the stored redirect response.
///
/// # Endpoint
///
/// `GET /{short_link}` (public)
///
/// # Response
///
/// The stored `response_status` (one of 301/302/303/307/308) with a
/// `Location` header pointing at the destination URL and the stored body as
/// the response body.
///
/// # Audit
///
/// Each match emits a `redirect matched` log event with actor `api` via the
/// bounded audit channel. If the queue is full, the event is dropped
/// (fire-and-forget) rather than delaying the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short link doesn't exist.
pub async fn resolve_handler(
    Path(short_link): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let redirect = state.redirect_service.get(&short_link).await?;

    state.audit(
        Actor::Api,
        LogEvent::RedirectMatched {
            short_link: redirect.short_link.clone(),
            url: redirect.url.clone(),
        },
    );

    let status = StatusCode::from_u16(redirect.response_status).map_err(|_| {
        AppError::internal(
            "Stored response status is invalid",
            serde_json::json!({ "response_status": redirect.response_status }),
        )
    })?;

    let location = HeaderValue::from_str(&redirect.url).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid header value",
            serde_json::json!({ "short_link": redirect.short_link }),
        )
    })?;

    let mut response = (status, redirect.body).into_response();
    response.headers_mut().insert(header::LOCATION, location);

    Ok(response)
}
