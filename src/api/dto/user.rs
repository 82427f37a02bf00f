//! DTOs for account endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::User;

/// Compiled regex for username validation.
static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request body for `POST /v0/user`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*USERNAME_REGEX"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request body for `PATCH /v0/user`.
///
/// All fields are optional — only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New username for the authenticated account.
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*USERNAME_REGEX"))]
    pub username: Option<String>,

    /// New password for the authenticated account.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// JSON representation of an account. Never carries password material.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateUserRequest {
            username: "alice".to_string(),
            password: "long-enough".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_username = CreateUserRequest {
            username: "a b".to_string(),
            password: "long-enough".to_string(),
        };
        assert!(bad_username.validate().is_err());

        let short_password = CreateUserRequest {
            username: "alice".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_user_response_omits_password() {
        let user = User::new(
            1,
            "alice".to_string(),
            "$argon2id$stub".to_string(),
            Utc::now(),
        );

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("hashed_password").is_none());
    }
}
