//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for the click ledger.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    /// Counter bump, last-seen update, and event append commit as one
    /// transaction; a missing link rolls everything back.
    ///
    /// `GREATEST` keeps `last_clicked_at` monotonic when two clicks on the
    /// same code commit out of timestamp order.
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tx = self.pool.begin().await?;
        let occurred_at = Utc::now();

        let link_id: Option<i64> = sqlx::query_scalar(
            "UPDATE links \
             SET click_count = click_count + 1, \
                 last_clicked_at = GREATEST(COALESCE(last_clicked_at, $2), $2) \
             WHERE code = $1 \
             RETURNING id",
        )
        .bind(&new_click.code)
        .bind(occurred_at)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(link_id) = link_id else {
            // Dropping the open transaction rolls the update back; nothing
            // is recorded for an unknown code.
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": new_click.code }),
            ));
        };

        let click = sqlx::query_as::<_, Click>(
            "INSERT INTO link_clicks (link_id, occurred_at, fingerprint, user_agent, referer) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, link_id, occurred_at, fingerprint, user_agent, referer",
        )
        .bind(link_id)
        .bind(occurred_at)
        .bind(&new_click.fingerprint)
        .bind(&new_click.user_agent)
        .bind(&new_click.referer)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(click)
    }

    async fn list_recent(&self, code: &str, limit: i64) -> Result<Option<Vec<Click>>, AppError> {
        let link_id: Option<i64> = sqlx::query_scalar("SELECT id FROM links WHERE code = $1")
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(link_id) = link_id else {
            return Ok(None);
        };

        let clicks = sqlx::query_as::<_, Click>(
            "SELECT id, link_id, occurred_at, fingerprint, user_agent, referer \
             FROM link_clicks \
             WHERE link_id = $1 \
             ORDER BY occurred_at DESC, id DESC \
             LIMIT $2",
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(Some(clicks))
    }
}
