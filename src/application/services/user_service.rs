//! Account registration and management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Minimum accepted username length.
const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum accepted username length.
const MAX_USERNAME_LENGTH: usize = 32;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Service for registering and managing accounts.
///
/// Hashes passwords with Argon2id before they reach the repository; the
/// clear-text password never leaves this layer.
pub struct UserService<U: UserRepository> {
    repository: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    /// Creates a new user service.
    pub fn new(repository: Arc<U>) -> Self {
        Self { repository }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username or password is
    /// malformed, [`AppError::Conflict`] if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        validate_username(username)?;
        validate_password(password)?;

        let new_user = NewUser {
            username: username.to_string(),
            hashed_password: hash_password(password)?,
        };

        self.repository.create(new_user).await
    }

    /// Retrieves an account by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account matches.
    pub async fn get(&self, username: &str) -> Result<User, AppError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "username": username })))
    }

    /// Changes the username and/or password of an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no change is requested or a new
    /// value is malformed, [`AppError::Conflict`] if the new username is
    /// taken, [`AppError::NotFound`] if the account does not exist.
    pub async fn update(
        &self,
        username: &str,
        new_username: Option<String>,
        new_password: Option<String>,
    ) -> Result<User, AppError> {
        if new_username.is_none() && new_password.is_none() {
            return Err(AppError::bad_request("No fields to update", json!({})));
        }

        if let Some(ref candidate) = new_username {
            validate_username(candidate)?;
        }

        let hashed_password = match new_password {
            Some(ref password) => {
                validate_password(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        let user = self.get(username).await?;

        let patch = UserPatch {
            username: new_username,
            hashed_password,
        };

        self.repository.update(user.id, patch).await
    }

    /// Removes an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    pub async fn remove(&self, username: &str) -> Result<(), AppError> {
        let user = self.get(username).await?;

        let deleted = self.repository.delete(user.id).await?;
        if !deleted {
            return Err(AppError::not_found(
                "User not found",
                json!({ "username": username }),
            ));
        }

        Ok(())
    }
}

/// Validates a candidate username.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
pub fn validate_username(username: &str) -> Result<(), AppError> {
    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        return Err(AppError::bad_request(
            "Username must be 3-32 characters",
            json!({ "provided_length": username.len() }),
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Username can only contain letters, digits, hyphens, and underscores",
            json!({ "username": username }),
        ));
    }

    Ok(())
}

/// Validates a candidate password (minimum length only).
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::bad_request(
            "Password must be at least 8 characters",
            json!({ "provided_length": password.len() }),
        ));
    }

    Ok(())
}
