//! Repository trait for the short-code registry.

use crate::domain::entities::{LinkEntry, NewLinkEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Result of an atomic insert-if-absent attempt.
///
/// Uniqueness is enforced by storage-level unique constraints, never by a
/// prior read: the violated constraint is the collision signal, which closes
/// the check-then-act race between two allocators proposing the same code or
/// the same destination concurrently.
#[derive(Debug)]
pub enum InsertOutcome {
    /// The entry was created.
    Created(LinkEntry),
    /// Another entry already owns this code.
    DuplicateCode,
    /// Another entry already owns this destination URL.
    DuplicateUrl,
}

/// Repository interface for link entries.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Attempts to insert a new entry in a single atomic operation.
    ///
    /// Collisions are reported through [`InsertOutcome`], not as errors: the
    /// caller decides whether a duplicate code means retry (generated codes)
    /// or rejection (custom codes).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_if_absent(&self, new_link: NewLinkEntry) -> Result<InsertOutcome, AppError>;

    /// Finds an entry by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkEntry>, AppError>;

    /// Finds an entry by its canonical destination URL.
    ///
    /// Backs idempotent de-duplication: re-submitting a destination returns
    /// the existing entry instead of allocating a second code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_destination(&self, destination_url: &str)
    -> Result<Option<LinkEntry>, AppError>;

    /// Lists entries ordered by creation time descending.
    ///
    /// `page` is 1-indexed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<LinkEntry>, AppError>;

    /// Counts all entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Deletes an entry and, through the cascading foreign key, every click
    /// event it owns.
    ///
    /// Returns `Ok(true)` if the entry existed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;
}
