//! Remote gateway operating against a running server over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::api::dto::health::HealthResponse;
use crate::api::dto::redirect::{RedirectListResponse, RedirectResponse};
use crate::api::dto::token::TokenResponse;
use crate::api::dto::user::UserResponse;
use crate::client::Gateway;
use crate::domain::entities::LogEntry;
use crate::error::AppError;

/// Gateway backed by the REST API of a running server.
///
/// Obtains a bearer token via the password flow on first use and caches it.
/// When a request comes back 401, the token is refreshed **once** under a
/// mutex and the request retried; the double-check inside
/// [`Self::refresh_token`] ensures concurrent 401s trigger a single
/// re-authentication rather than a stampede.
pub struct RemoteGateway {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    token: Mutex<Option<String>>,
}

/// Error envelope as received over the wire.
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    error: RemoteErrorInfo,
}

#[derive(Debug, Deserialize)]
struct RemoteErrorInfo {
    #[allow(dead_code)]
    code: String,
    message: String,
    #[serde(default)]
    details: Value,
}

impl RemoteGateway {
    /// Creates a gateway for the given server and credentials.
    ///
    /// No network traffic happens here; the first request triggers login.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn new(server: &str, username: String, password: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("snapctl/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Failed to build HTTP client",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self {
            http,
            base_url: server.trim_end_matches('/').to_string(),
            username,
            password,
            token: Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs credentials to the token endpoint and returns a fresh token.
    async fn login(&self) -> Result<String, AppError> {
        let resp = self
            .http
            .post(self.url("/v0/security/token"))
            .form(&[
                ("grant_type", "password"),
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let token: TokenResponse = resp.json().await.map_err(|e| {
            AppError::internal(
                "Malformed token response",
                json!({ "reason": e.to_string() }),
            )
        })?;

        Ok(token.access_token)
    }

    /// Returns the cached token, logging in first if none is cached.
    async fn token(&self) -> Result<String, AppError> {
        let mut guard = self.token.lock().await;

        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        let fresh = self.login().await?;
        *guard = Some(fresh.clone());

        Ok(fresh)
    }

    /// Replaces a stale token after a 401.
    ///
    /// Double-checked under the mutex: if another task already replaced the
    /// token since `stale` was read, that token is returned without a second
    /// login.
    async fn refresh_token(&self, stale: &str) -> Result<String, AppError> {
        let mut guard = self.token.lock().await;

        if let Some(current) = guard.as_ref() {
            if current != stale {
                return Ok(current.clone());
            }
        }

        let fresh = self.login().await?;
        *guard = Some(fresh.clone());

        Ok(fresh)
    }

    /// Sends an authorized request, retrying once after re-authentication
    /// when the server answers 401.
    async fn execute<F>(&self, make: F) -> Result<reqwest::Response, AppError>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        let token = self.token().await?;

        let resp = make(&self.http)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(transport_error)?;

        if resp.status() != StatusCode::UNAUTHORIZED {
            return Ok(resp);
        }

        let fresh = self.refresh_token(&token).await?;

        make(&self.http)
            .bearer_auth(&fresh)
            .send()
            .await
            .map_err(transport_error)
    }

    /// Remote access is scoped to the authenticated account.
    fn ensure_own_account(&self, username: &str) -> Result<(), AppError> {
        if username != self.username {
            return Err(AppError::bad_request(
                "The remote backend can only manage the account it authenticates as",
                json!({ "requested": username, "authenticated": self.username }),
            ));
        }

        Ok(())
    }
}

/// Decodes a JSON body on success, or maps the error envelope.
async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, AppError> {
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }

    resp.json().await.map_err(|e| {
        AppError::internal(
            "Malformed server response",
            json!({ "reason": e.to_string() }),
        )
    })
}

/// Maps a 2xx-with-no-body response, or the error envelope.
async fn expect_no_content(resp: reqwest::Response) -> Result<(), AppError> {
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(resp).await)
    }
}

/// Rebuilds an [`AppError`] from the wire envelope and status code.
async fn error_from_response(resp: reqwest::Response) -> AppError {
    let status = resp.status();

    let (message, details) = match resp.json::<RemoteErrorBody>().await {
        Ok(body) => (body.error.message, body.error.details),
        Err(_) => (format!("Server returned {}", status), json!({})),
    };

    match status {
        StatusCode::BAD_REQUEST => AppError::bad_request(message, details),
        StatusCode::UNAUTHORIZED => AppError::unauthorized(message, details),
        StatusCode::NOT_FOUND => AppError::not_found(message, details),
        StatusCode::CONFLICT => AppError::conflict(message, details),
        _ => AppError::internal(message, details),
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::internal("Request failed", json!({ "reason": e.to_string() }))
}

/// Builds a JSON object from only the provided fields.
fn json_object(fields: &[(&str, Option<Value>)]) -> Value {
    let mut map = serde_json::Map::new();

    for (key, value) in fields {
        if let Some(value) = value {
            map.insert((*key).to_string(), value.clone());
        }
    }

    Value::Object(map)
}

#[async_trait]
impl Gateway for RemoteGateway {
    async fn create_user(&self, username: &str, password: &str) -> Result<UserResponse, AppError> {
        // Registration is public; no bearer token involved.
        let resp = self
            .http
            .post(self.url("/v0/user"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        decode(resp).await
    }

    async fn show_user(&self, username: &str) -> Result<UserResponse, AppError> {
        self.ensure_own_account(username)?;

        let resp = self.execute(|http| http.get(self.url("/v0/user"))).await?;

        decode(resp).await
    }

    async fn update_user(
        &self,
        username: &str,
        new_username: Option<String>,
        new_password: Option<String>,
    ) -> Result<UserResponse, AppError> {
        self.ensure_own_account(username)?;

        let body = json_object(&[
            ("username", new_username.map(Value::String)),
            ("password", new_password.map(Value::String)),
        ]);

        let resp = self
            .execute(|http| http.patch(self.url("/v0/user")).json(&body))
            .await?;

        decode(resp).await
    }

    async fn remove_user(&self, username: &str) -> Result<(), AppError> {
        self.ensure_own_account(username)?;

        let resp = self
            .execute(|http| http.delete(self.url("/v0/user")))
            .await?;

        expect_no_content(resp).await
    }

    async fn add_redirect(
        &self,
        short_link: Option<String>,
        url: String,
        response_status: Option<u16>,
        body: Option<String>,
    ) -> Result<RedirectResponse, AppError> {
        let payload = json_object(&[
            ("short_link", short_link.map(Value::String)),
            ("url", Some(Value::String(url))),
            ("response_status", response_status.map(|s| json!(s))),
            ("body", body.map(Value::String)),
        ]);

        let resp = self
            .execute(|http| http.post(self.url("/v0/redirect")).json(&payload))
            .await?;

        decode(resp).await
    }

    async fn list_redirects(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<RedirectResponse>, i64), AppError> {
        let resp = self
            .execute(|http| {
                http.get(self.url("/v0/redirect"))
                    .query(&[("page", page), ("page_size", page_size)])
            })
            .await?;

        let list: RedirectListResponse = decode(resp).await?;

        Ok((list.items, list.pagination.total))
    }

    async fn show_redirect(&self, short_link: &str) -> Result<RedirectResponse, AppError> {
        let resp = self
            .execute(|http| http.get(self.url(&format!("/v0/redirect/{short_link}"))))
            .await?;

        decode(resp).await
    }

    async fn update_redirect(
        &self,
        short_link: &str,
        url: Option<String>,
        response_status: Option<u16>,
        body: Option<String>,
    ) -> Result<RedirectResponse, AppError> {
        let payload = json_object(&[
            ("url", url.map(Value::String)),
            ("response_status", response_status.map(|s| json!(s))),
            ("body", body.map(Value::String)),
        ]);

        let resp = self
            .execute(|http| {
                http.patch(self.url(&format!("/v0/redirect/{short_link}")))
                    .json(&payload)
            })
            .await?;

        decode(resp).await
    }

    async fn remove_redirect(&self, short_link: &str) -> Result<(), AppError> {
        let resp = self
            .execute(|http| http.delete(self.url(&format!("/v0/redirect/{short_link}"))))
            .await?;

        expect_no_content(resp).await
    }

    async fn list_log(
        &self,
        _page: i64,
        _page_size: i64,
    ) -> Result<(Vec<LogEntry>, i64), AppError> {
        Err(AppError::bad_request(
            "Log listing is only available with the local backend",
            json!({}),
        ))
    }

    async fn check(&self) -> Result<String, AppError> {
        let resp = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let health: HealthResponse = resp.json().await.map_err(|e| {
            AppError::internal(
                "Malformed health response",
                json!({ "reason": e.to_string() }),
            )
        })?;

        Ok(format!(
            "Server {} (version {}, HTTP {})",
            health.status, health.version, status
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::HeaderMap;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use chrono::Utc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct StubState {
        logins: Arc<AtomicUsize>,
    }

    /// Issues `token-1`, `token-2`, ... counting logins.
    async fn stub_token(State(st): State<StubState>) -> Json<TokenResponse> {
        let n = st.logins.fetch_add(1, Ordering::SeqCst) + 1;

        Json(TokenResponse {
            access_token: format!("token-{n}"),
            token_type: "bearer".to_string(),
            expires_in: 60,
        })
    }

    /// Accepts only the most recently issued token.
    async fn stub_user(State(st): State<StubState>, headers: HeaderMap) -> Response {
        let n = st.logins.load(Ordering::SeqCst);
        let expected = format!("Bearer token-{n}");

        let authorized = n > 0
            && headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == expected);

        if authorized {
            Json(UserResponse {
                id: 1,
                username: "alice".to_string(),
                created_at: Utc::now(),
            })
            .into_response()
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": { "code": "unauthorized", "message": "Unauthorized", "details": {} }
                })),
            )
                .into_response()
        }
    }

    async fn spawn_stub() -> (String, Arc<AtomicUsize>) {
        let logins = Arc::new(AtomicUsize::new(0));

        let app = Router::new()
            .route("/v0/security/token", post(stub_token))
            .route("/v0/user", get(stub_user))
            .with_state(StubState {
                logins: logins.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), logins)
    }

    fn gateway(base: &str) -> RemoteGateway {
        RemoteGateway::new(base, "alice".to_string(), "password-1".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_logs_in_on_first_use() {
        let (base, logins) = spawn_stub().await;
        let gw = gateway(&base);

        let user = gw.show_user("alice").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reuses_cached_token() {
        let (base, logins) = spawn_stub().await;
        let gw = gateway(&base);

        gw.show_user("alice").await.unwrap();
        gw.show_user("alice").await.unwrap();

        assert_eq!(logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reauthenticates_once_on_401() {
        let (base, logins) = spawn_stub().await;
        let gw = gateway(&base);

        // Seed a token the server never issued.
        *gw.token.lock().await = Some("stale-token".to_string());

        let user = gw.show_user("alice").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_401s_trigger_single_login() {
        let (base, logins) = spawn_stub().await;
        let gw = gateway(&base);

        *gw.token.lock().await = Some("stale-token".to_string());

        let (a, b) = tokio::join!(gw.show_user("alice"), gw.show_user("alice"));

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejects_foreign_account() {
        let (base, logins) = spawn_stub().await;
        let gw = gateway(&base);

        let result = gw.show_user("bob").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
        // Rejected before any network traffic.
        assert_eq!(logins.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_json_object_skips_absent_fields() {
        let body = json_object(&[
            ("url", Some(Value::String("https://example.com".to_string()))),
            ("response_status", None),
        ]);

        assert_eq!(body["url"], "https://example.com");
        assert!(body.get("response_status").is_none());
    }
}
