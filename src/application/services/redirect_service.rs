//! Redirect creation, retrieval, and matching service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::redirect::{DEFAULT_RESPONSE_STATUS, is_allowed_response_status};
use crate::domain::entities::{NewRedirect, Redirect, RedirectPatch};
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;
use crate::utils::short_link::{generate_short_link, validate_short_link};

/// Service for creating, managing, and matching short link redirects.
pub struct RedirectService<R: RedirectRepository> {
    repository: Arc<R>,
}

impl<R: RedirectRepository> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a new redirect.
    ///
    /// # Short link selection
    ///
    /// - If `short_link` is provided, validates it and fails with a conflict
    ///   when it is already taken
    /// - Otherwise generates a random 12-character link, retrying up to 10
    ///   times on collision before failing
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL, short link, or response
    /// status is invalid, [`AppError::Conflict`] if the short link exists.
    pub async fn create(
        &self,
        short_link: Option<String>,
        url: String,
        response_status: Option<u16>,
        body: Option<String>,
    ) -> Result<Redirect, AppError> {
        validate_target_url(&url)?;

        let response_status = response_status.unwrap_or(DEFAULT_RESPONSE_STATUS);
        validate_response_status(response_status)?;

        let short_link = if let Some(custom) = short_link {
            validate_short_link(&custom)?;

            if self
                .repository
                .find_by_short_link(&custom)
                .await?
                .is_some()
            {
                return Err(AppError::conflict(
                    "Short link already exists",
                    json!({ "short_link": custom }),
                ));
            }

            custom
        } else {
            self.generate_unique_short_link().await?
        };

        let new_redirect = NewRedirect {
            short_link,
            url,
            response_status,
            body: body.unwrap_or_default(),
        };

        self.repository.create(new_redirect).await
    }

    /// Retrieves a redirect by its short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no redirect matches.
    pub async fn get(&self, short_link: &str) -> Result<Redirect, AppError> {
        self.repository
            .find_by_short_link(short_link)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Redirect not found", json!({ "short_link": short_link }))
            })
    }

    /// Lists redirects with pagination, returning the page and total count.
    pub async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<Redirect>, i64), AppError> {
        let items = self.repository.list(page, page_size).await?;
        let total = self.repository.count().await?;

        Ok((items, total))
    }

    /// Partially updates a redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no change is requested or a new
    /// value is invalid, [`AppError::NotFound`] if the redirect is absent.
    pub async fn update(&self, short_link: &str, patch: RedirectPatch) -> Result<Redirect, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request("No fields to update", json!({})));
        }

        if let Some(ref url) = patch.url {
            validate_target_url(url)?;
        }

        if let Some(status) = patch.response_status {
            validate_response_status(status)?;
        }

        self.repository.update(short_link, patch).await
    }

    /// Removes a redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the redirect does not exist.
    pub async fn remove(&self, short_link: &str) -> Result<(), AppError> {
        let deleted = self.repository.delete(short_link).await?;
        if !deleted {
            return Err(AppError::not_found(
                "Redirect not found",
                json!({ "short_link": short_link }),
            ));
        }

        Ok(())
    }

    /// Generates a unique short link with collision retry.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_short_link(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let candidate = generate_short_link();

            if self
                .repository
                .find_by_short_link(&candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short link",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

/// Validates a redirect target URL: must parse and use http or https.
fn validate_target_url(url: &str) -> Result<(), AppError> {
    let parsed = url::Url::parse(url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "URL must use http or https",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(())
}

fn validate_response_status(status: u16) -> Result<(), AppError> {
    if !is_allowed_response_status(status) {
        return Err(AppError::bad_request(
            "Response status must be one of 301, 302, 303, 307, 308",
            json!({ "response_status": status }),
        ));
    }

    Ok(())
}
