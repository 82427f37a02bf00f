//! SQLite implementation of the redirect repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewRedirect, Redirect, RedirectPatch};
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;

/// SQLite repository for redirect storage and retrieval.
pub struct SqliteRedirectRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteRedirectRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RedirectRow {
    id: i64,
    short_link: String,
    url: String,
    response_status: u16,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<RedirectRow> for Redirect {
    fn from(row: RedirectRow) -> Self {
        Redirect::new(
            row.id,
            row.short_link,
            row.url,
            row.response_status,
            row.body,
            row.created_at,
        )
    }
}

const REDIRECT_COLUMNS: &str = "id, short_link, url, response_status, body, created_at";

#[async_trait]
impl RedirectRepository for SqliteRedirectRepository {
    async fn create(&self, new_redirect: NewRedirect) -> Result<Redirect, AppError> {
        let row = sqlx::query_as::<_, RedirectRow>(&format!(
            r#"
            INSERT INTO redirects (short_link, url, response_status, body, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {REDIRECT_COLUMNS}
            "#,
        ))
        .bind(&new_redirect.short_link)
        .bind(&new_redirect.url)
        .bind(new_redirect.response_status)
        .bind(&new_redirect.body)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => AppError::conflict(
                "Short link already exists",
                json!({ "short_link": new_redirect.short_link }),
            ),
            _ => e.into(),
        })?;

        Ok(row.into())
    }

    async fn find_by_short_link(&self, short_link: &str) -> Result<Option<Redirect>, AppError> {
        let row = sqlx::query_as::<_, RedirectRow>(&format!(
            "SELECT {REDIRECT_COLUMNS} FROM redirects WHERE short_link = ?"
        ))
        .bind(short_link)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<Redirect>, AppError> {
        let offset = (page - 1) * page_size;

        let rows = sqlx::query_as::<_, RedirectRow>(&format!(
            r#"
            SELECT {REDIRECT_COLUMNS} FROM redirects
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        ))
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM redirects")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count.0)
    }

    async fn update(&self, short_link: &str, patch: RedirectPatch) -> Result<Redirect, AppError> {
        let row = sqlx::query_as::<_, RedirectRow>(&format!(
            r#"
            UPDATE redirects SET
                url = COALESCE(?, url),
                response_status = COALESCE(?, response_status),
                body = COALESCE(?, body)
            WHERE short_link = ?
            RETURNING {REDIRECT_COLUMNS}
            "#,
        ))
        .bind(&patch.url)
        .bind(patch.response_status)
        .bind(&patch.body)
        .bind(short_link)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into).ok_or_else(|| {
            AppError::not_found("Redirect not found", json!({ "short_link": short_link }))
        })
    }

    async fn delete(&self, short_link: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM redirects WHERE short_link = ?")
            .bind(short_link)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
