//! Click ledger service: recording and reading redirect events.

use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;
use serde_json::json;

/// Default cap for the recent-events listing.
pub const DEFAULT_RECENT_LIMIT: i64 = 100;

/// Service over the append-only click ledger.
///
/// Recording is normally driven by the background worker
/// ([`crate::domain::click_worker`]); the direct [`Self::record`] path exists
/// for tests and synchronous callers.
pub struct ClickLedgerService<C: ClickRepository> {
    repository: Arc<C>,
}

impl<C: ClickRepository> ClickLedgerService<C> {
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// Records one click atomically: event append, counter increment, and
    /// last-seen update commit together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry exists for the code;
    /// nothing is recorded.
    pub async fn record(
        &self,
        code: &str,
        fingerprint: String,
        user_agent: Option<String>,
        referer: Option<String>,
    ) -> Result<Click, AppError> {
        self.repository
            .record(NewClick {
                code: code.to_string(),
                fingerprint,
                user_agent,
                referer,
            })
            .await
    }

    /// Lists the most recent clicks for a code, newest first.
    ///
    /// `limit` is clamped to [`DEFAULT_RECENT_LIMIT`] at most.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry exists for the code.
    pub async fn list_recent(&self, code: &str, limit: i64) -> Result<Vec<Click>, AppError> {
        let limit = limit.clamp(1, DEFAULT_RECENT_LIMIT);

        self.repository
            .list_recent(code, limit)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }
}
