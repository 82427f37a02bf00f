//! Redirect entity representing a short link mapping.

use chrono::{DateTime, Utc};

/// HTTP status codes a redirect may respond with.
pub const ALLOWED_RESPONSE_STATUSES: &[u16] = &[301, 302, 303, 307, 308];

/// Status used when a redirect is created without an explicit one.
pub const DEFAULT_RESPONSE_STATUS: u16 = 307;

/// A stored short link mapping.
///
/// On match, the service responds with `response_status`, a `Location`
/// header pointing at `url`, and `body` as the response body.
#[derive(Debug, Clone)]
pub struct Redirect {
    pub id: i64,
    pub short_link: String,
    pub url: String,
    pub response_status: u16,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Redirect {
    /// Creates a new Redirect instance.
    pub fn new(
        id: i64,
        short_link: String,
        url: String,
        response_status: u16,
        body: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_link,
            url,
            response_status,
            body,
            created_at,
        }
    }
}

/// Returns true for status codes a redirect is allowed to respond with.
pub fn is_allowed_response_status(status: u16) -> bool {
    ALLOWED_RESPONSE_STATUSES.contains(&status)
}

/// Input data for creating a new redirect.
#[derive(Debug, Clone)]
pub struct NewRedirect {
    pub short_link: String,
    pub url: String,
    pub response_status: u16,
    pub body: String,
}

/// Partial update for an existing redirect.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct RedirectPatch {
    pub url: Option<String>,
    pub response_status: Option<u16>,
    pub body: Option<String>,
}

impl RedirectPatch {
    /// Returns true when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.response_status.is_none() && self.body.is_none()
    }
}
