//! Repository trait for the click ledger.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recording and reading click events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a click as one atomic unit: append the event, increment the
    /// owning entry's `click_count` by exactly 1, and move `last_clicked_at`
    /// forward to the event's `occurred_at`.
    ///
    /// Partial application (event without counter bump, or vice versa) must
    /// be impossible; implementations commit all three effects in a single
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry exists for the code;
    /// nothing is recorded in that case.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Lists the most recent click events for a code, newest first, capped at
    /// `limit`.
    ///
    /// Returns `Ok(None)` when no entry exists for the code, so deleted links
    /// are indistinguishable from never-created ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_recent(&self, code: &str, limit: i64) -> Result<Option<Vec<Click>>, AppError>;
}
