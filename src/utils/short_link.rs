//! Short link generation and validation utilities.
//!
//! Provides cryptographically secure random short link generation and
//! validation for custom user-provided links.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const LINK_LENGTH_BYTES: usize = 9;

/// Maximum accepted length for a custom short link.
const MAX_LINK_LENGTH: usize = 64;

/// Path segments that cannot be used as short links.
///
/// These are reserved for system endpoints to prevent routing conflicts.
const RESERVED_LINKS: &[&str] = &["v0", "health"];

/// Generates a cryptographically secure random short link.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character link.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_short_link() -> String {
    let mut buffer = [0u8; LINK_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a user-provided custom short link.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved system path segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_short_link(short_link: &str) -> Result<(), AppError> {
    if short_link.is_empty() || short_link.len() > MAX_LINK_LENGTH {
        return Err(AppError::bad_request(
            "Short link must be 1-64 characters",
            json!({ "provided_length": short_link.len() }),
        ));
    }

    if !short_link
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Short link can only contain letters, digits, hyphens, and underscores",
            json!({ "short_link": short_link }),
        ));
    }

    if RESERVED_LINKS.contains(&short_link) {
        return Err(AppError::bad_request(
            "This short link is reserved",
            json!({ "short_link": short_link }),
        ));
    }

    Ok(())
}
