//! DTOs for the token endpoint.

use serde::{Deserialize, Serialize};

/// Form body for `POST /v0/security/token`.
///
/// OAuth2 password flow shape: `grant_type` is accepted for compatibility
/// but only `password` (or absence) is allowed.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
}

/// Response body for a successful token request.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_accepts_missing_grant_type() {
        let request: TokenRequest = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "password": "secret12"
        }))
        .unwrap();

        assert_eq!(request.username, "alice");
        assert!(request.grant_type.is_none());
    }

    #[test]
    fn test_token_response_shape() {
        let response = TokenResponse {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 1800,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["expires_in"], 1800);
    }
}
