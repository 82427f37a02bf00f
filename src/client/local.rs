//! Local gateway operating directly on the SQLite database.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;

use crate::api::dto::redirect::RedirectResponse;
use crate::api::dto::user::UserResponse;
use crate::application::services::{RedirectService, UserService};
use crate::client::Gateway;
use crate::domain::entities::{LogEntry, RedirectPatch};
use crate::domain::log_event::{Actor, LogEvent};
use crate::domain::repositories::LogRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::{
    SqliteLogRepository, SqliteRedirectRepository, SqliteUserRepository,
};

/// Gateway backed by a direct database connection.
///
/// Uses the same services as the HTTP server, so behavior (validation,
/// hashing, conflict handling) is identical. Audit entries are written
/// synchronously with actor `cli` — there is no server process around to
/// own a background worker.
pub struct LocalGateway {
    user_service: UserService<SqliteUserRepository>,
    redirect_service: RedirectService<SqliteRedirectRepository>,
    log_repository: Arc<SqliteLogRepository>,
}

impl LocalGateway {
    /// Connects to the database and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the connection or a migration fails.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            AppError::internal(
                "Failed to run migrations",
                serde_json::json!({ "reason": e.to_string() }),
            )
        })?;

        let pool = Arc::new(pool);

        Ok(Self {
            user_service: UserService::new(Arc::new(SqliteUserRepository::new(pool.clone()))),
            redirect_service: RedirectService::new(Arc::new(SqliteRedirectRepository::new(
                pool.clone(),
            ))),
            log_repository: Arc::new(SqliteLogRepository::new(pool)),
        })
    }

    /// Appends an audit entry with actor `cli`, warning on failure.
    async fn audit(&self, event: LogEvent) {
        if let Err(e) = self.log_repository.append(&Actor::Cli, &event).await {
            tracing::warn!(error = %e, "Failed to write audit entry");
        }
    }
}

#[async_trait]
impl Gateway for LocalGateway {
    async fn create_user(&self, username: &str, password: &str) -> Result<UserResponse, AppError> {
        let user = self.user_service.register(username, password).await?;

        self.audit(LogEvent::UserCreated {
            username: user.username.clone(),
        })
        .await;

        Ok(user.into())
    }

    async fn show_user(&self, username: &str) -> Result<UserResponse, AppError> {
        let user = self.user_service.get(username).await?;

        self.audit(LogEvent::UserRead {
            username: user.username.clone(),
        })
        .await;

        Ok(user.into())
    }

    async fn update_user(
        &self,
        username: &str,
        new_username: Option<String>,
        new_password: Option<String>,
    ) -> Result<UserResponse, AppError> {
        let user = self
            .user_service
            .update(username, new_username, new_password)
            .await?;

        self.audit(LogEvent::UserUpdated {
            username: user.username.clone(),
        })
        .await;

        Ok(user.into())
    }

    async fn remove_user(&self, username: &str) -> Result<(), AppError> {
        self.user_service.remove(username).await?;

        self.audit(LogEvent::UserRemoved {
            username: username.to_string(),
        })
        .await;

        Ok(())
    }

    async fn add_redirect(
        &self,
        short_link: Option<String>,
        url: String,
        response_status: Option<u16>,
        body: Option<String>,
    ) -> Result<RedirectResponse, AppError> {
        let redirect = self
            .redirect_service
            .create(short_link, url, response_status, body)
            .await?;

        self.audit(LogEvent::RedirectCreated {
            short_link: redirect.short_link.clone(),
            url: redirect.url.clone(),
        })
        .await;

        Ok(redirect.into())
    }

    async fn list_redirects(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<RedirectResponse>, i64), AppError> {
        let (items, total) = self.redirect_service.list(page, page_size).await?;

        Ok((items.into_iter().map(Into::into).collect(), total))
    }

    async fn show_redirect(&self, short_link: &str) -> Result<RedirectResponse, AppError> {
        let redirect = self.redirect_service.get(short_link).await?;

        self.audit(LogEvent::RedirectRead {
            short_link: redirect.short_link.clone(),
        })
        .await;

        Ok(redirect.into())
    }

    async fn update_redirect(
        &self,
        short_link: &str,
        url: Option<String>,
        response_status: Option<u16>,
        body: Option<String>,
    ) -> Result<RedirectResponse, AppError> {
        let patch = RedirectPatch {
            url,
            response_status,
            body,
        };

        let redirect = self.redirect_service.update(short_link, patch).await?;

        self.audit(LogEvent::RedirectUpdated {
            short_link: redirect.short_link.clone(),
        })
        .await;

        Ok(redirect.into())
    }

    async fn remove_redirect(&self, short_link: &str) -> Result<(), AppError> {
        self.redirect_service.remove(short_link).await?;

        self.audit(LogEvent::RedirectRemoved {
            short_link: short_link.to_string(),
        })
        .await;

        Ok(())
    }

    async fn list_log(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<LogEntry>, i64), AppError> {
        let entries = self.log_repository.list(page, page_size).await?;
        let total = self.log_repository.count().await?;

        Ok((entries, total))
    }

    async fn check(&self) -> Result<String, AppError> {
        let (_, total) = self.redirect_service.list(1, 1).await?;

        Ok(format!("Database connection OK, {} redirects", total))
    }
}
