//! User entity representing a registered account.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `hashed_password` is an Argon2id PHC string; the clear-text password never
/// leaves the request handler that received it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        username: String,
        hashed_password: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            hashed_password,
            created_at,
        }
    }
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub hashed_password: String,
}

/// Partial update for an existing user.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub hashed_password: Option<String>,
}

impl UserPatch {
    /// Returns true when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.hashed_password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_user_creation() {
        let now = Utc::now();
        let user = User::new(1, "alice".to_string(), "$argon2id$stub".to_string(), now);

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
        assert_eq!(user.created_at, now);
    }

    #[test]
    fn test_user_patch_is_empty() {
        assert!(UserPatch::default().is_empty());

        let patch = UserPatch {
            username: Some("bob".to_string()),
            hashed_password: None,
        };
        assert!(!patch.is_empty());
    }
}
