//! DTOs for redirect management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::api::dto::pagination::PaginationMeta;
use crate::domain::entities::Redirect;

/// Compiled regex for short link validation.
static SHORT_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request body for `POST /v0/redirect`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRedirectRequest {
    /// Optional custom short link (generated when absent).
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*SHORT_LINK_REGEX"))]
    pub short_link: Option<String>,

    /// Destination URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Redirect status code; defaults to 307.
    pub response_status: Option<u16>,

    /// Response body served alongside the redirect; defaults to empty.
    pub body: Option<String>,
}

/// Request body for `PATCH /v0/redirect/{short_link}`.
///
/// All fields are optional — only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRedirectRequest {
    /// New destination URL for this redirect.
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,

    /// New redirect status code.
    pub response_status: Option<u16>,

    /// New response body.
    pub body: Option<String>,
}

/// JSON representation of a redirect.
#[derive(Debug, Serialize, Deserialize)]
pub struct RedirectResponse {
    pub id: i64,
    pub short_link: String,
    pub url: String,
    pub response_status: u16,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Redirect> for RedirectResponse {
    fn from(redirect: Redirect) -> Self {
        Self {
            id: redirect.id,
            short_link: redirect.short_link,
            url: redirect.url,
            response_status: redirect.response_status,
            body: redirect.body,
            created_at: redirect.created_at,
        }
    }
}

/// Response body for `GET /v0/redirect`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RedirectListResponse {
    pub items: Vec<RedirectResponse>,
    pub pagination: PaginationMeta,
}
