//! Handler for the token endpoint.

use axum::{Form, Json, extract::State};
use serde_json::json;

use crate::api::dto::token::{TokenRequest, TokenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Issues a bearer token for valid credentials.
///
/// # Endpoint
///
/// `POST /v0/security/token` (public)
///
/// # Request Body
///
/// OAuth2 password flow, form-encoded:
///
/// ```text
/// grant_type=password&username=alice&password=correct+horse
/// ```
///
/// `grant_type` may be omitted; any value other than `password` is rejected.
///
/// # Response
///
/// ```json
/// { "access_token": "<jwt>", "token_type": "bearer", "expires_in": 1800 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an unsupported grant type.
/// Returns 401 Unauthorized for unknown credentials; the response never
/// distinguishes a bad username from a bad password.
pub async fn token_handler(
    State(state): State<AppState>,
    Form(payload): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    if let Some(ref grant_type) = payload.grant_type {
        if grant_type != "password" {
            return Err(AppError::bad_request(
                "Unsupported grant type",
                json!({ "grant_type": grant_type }),
            ));
        }
    }

    let issued = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(TokenResponse {
        access_token: issued.access_token,
        token_type: "bearer".to_string(),
        expires_in: issued.expires_in,
    }))
}
