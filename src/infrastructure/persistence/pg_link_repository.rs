//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkEntry, NewLinkEntry};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::{AppError, map_sqlx_error};

const LINK_COLUMNS: &str =
    "id, code, destination_url, category, security_score, click_count, last_clicked_at, created_at";

/// PostgreSQL repository for link entries.
///
/// Uniqueness of `code` and `destination_url` is enforced by the unique
/// indexes `links_code_key` and `links_destination_url_key`; the insert path
/// translates a violation of either into the matching [`InsertOutcome`]
/// instead of an error.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLinkEntry) -> Result<InsertOutcome, AppError> {
        let result = sqlx::query_as::<_, LinkEntry>(&format!(
            "INSERT INTO links (code, destination_url, category, security_score) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&new_link.code)
        .bind(&new_link.destination_url)
        .bind(&new_link.category)
        .bind(new_link.security_score)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(entry) => Ok(InsertOutcome::Created(entry)),
            Err(e) => {
                let constraint = e
                    .as_database_error()
                    .filter(|db| db.is_unique_violation())
                    .and_then(|db| db.constraint())
                    .map(str::to_string);

                match constraint.as_deref() {
                    Some("links_code_key") => Ok(InsertOutcome::DuplicateCode),
                    Some("links_destination_url_key") => Ok(InsertOutcome::DuplicateUrl),
                    _ => Err(map_sqlx_error(e)),
                }
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkEntry>, AppError> {
        let entry = sqlx::query_as::<_, LinkEntry>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(entry)
    }

    async fn find_by_destination(
        &self,
        destination_url: &str,
    ) -> Result<Option<LinkEntry>, AppError> {
        let entry = sqlx::query_as::<_, LinkEntry>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE destination_url = $1"
        ))
        .bind(destination_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(entry)
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<LinkEntry>, AppError> {
        let offset = (page.max(1) - 1) * page_size;

        let entries = sqlx::query_as::<_, LinkEntry>(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        ))
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(entries)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
