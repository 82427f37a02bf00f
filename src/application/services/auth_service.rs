//! Authentication service for password login and bearer token validation.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::jwt_service::{IssuedToken, JwtService};
use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::verify_password;

/// Service for authenticating accounts and validating bearer tokens.
///
/// Login failures never reveal whether the username or the password was
/// wrong; both cases produce the same 401.
pub struct AuthService<U: UserRepository> {
    repository: Arc<U>,
    jwt: Arc<JwtService>,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<U>, jwt: Arc<JwtService>) -> Self {
        Self { repository, jwt }
    }

    /// Verifies credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the username is unknown or the
    /// password does not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AppError> {
        let user = self.repository.find_by_username(username).await?;

        let Some(user) = user else {
            return Err(invalid_credentials());
        };

        if !verify_password(password, &user.hashed_password)? {
            return Err(invalid_credentials());
        }

        self.jwt.issue(&user.username)
    }

    /// Validates a bearer token and loads the account it names.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid, expired,
    /// or names an account that no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.jwt.verify(token)?;

        self.repository
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Account no longer exists" }),
                )
            })
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Invalid username or password" }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::utils::password::hash_password;
    use chrono::Utc;

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("test_secret_key_32_bytes_long!!", 30))
    }

    fn stored_user(username: &str, password: &str) -> User {
        User::new(
            1,
            username.to_string(),
            hash_password(password).unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut mock_repo = MockUserRepository::new();

        let user = stored_user("alice", "correct horse");
        mock_repo
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let issued = service.login("alice", "correct horse").await.unwrap();
        assert!(!issued.access_token.is_empty());
        assert_eq!(issued.expires_in, 30 * 60);
    }

    #[tokio::test]
    async fn test_login_unknown_username() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let result = service.login("nobody", "password").await;
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock_repo = MockUserRepository::new();

        let user = stored_user("alice", "correct horse");
        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let result = service.login("alice", "wrong").await;
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let mut mock_repo = MockUserRepository::new();

        let user = stored_user("alice", "correct horse");
        mock_repo
            .expect_find_by_username()
            .times(2)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let issued = service.login("alice", "correct horse").await.unwrap();
        let authenticated = service.authenticate(&issued.access_token).await.unwrap();

        assert_eq!(authenticated.username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_garbage_token() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), test_jwt());

        let result = service.authenticate("not-a-jwt").await;
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_deleted_account() {
        let mut mock_repo = MockUserRepository::new();

        // Token is valid, but the account it names is gone.
        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let jwt = test_jwt();
        let issued = jwt.issue("alice").unwrap();

        let service = AuthService::new(Arc::new(mock_repo), jwt);

        let result = service.authenticate(&issued.access_token).await;
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }
}
