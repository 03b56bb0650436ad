//! Short-code registry service: allocation, resolution, and deletion.

use std::sync::Arc;

use crate::domain::entities::{LinkEntry, NewLinkEntry};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::url_guard::ensure_http_url;
use serde_json::json;
use tracing::debug;

/// Total insert attempts for a generated code, including the first.
///
/// Collision probability per attempt is low (time-biased ids) but not zero;
/// the hard cap guarantees termination even under a stalled clock producing
/// identical timestamps.
const MAX_GENERATE_ATTEMPTS: u32 = 5;

/// Outcome of an allocation request.
#[derive(Debug)]
pub enum Allocation {
    /// A new entry was created for this destination.
    Created(LinkEntry),
    /// The destination was already registered; the existing entry is returned
    /// unchanged.
    Existing(LinkEntry),
}

impl Allocation {
    pub fn entry(&self) -> &LinkEntry {
        match self {
            Allocation::Created(entry) | Allocation::Existing(entry) => entry,
        }
    }

    pub fn into_entry(self) -> LinkEntry {
        match self {
            Allocation::Created(entry) | Allocation::Existing(entry) => entry,
        }
    }
}

/// Service owning the short-code namespace.
///
/// Uniqueness is delegated entirely to the storage unique constraints via
/// [`LinkRepository::insert_if_absent`]; this service never pre-checks a code
/// before inserting.
pub struct LinkService<L: LinkRepository> {
    repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Allocates a short code for a destination URL.
    ///
    /// # De-duplication
    ///
    /// If the canonical destination is already registered, the existing entry
    /// is returned unchanged — this takes priority over custom-code
    /// validation and code generation. A concurrent allocation of the same
    /// destination loses the insert race on the destination unique index and
    /// resolves to the winner's entry.
    ///
    /// # Code selection
    ///
    /// - With `custom_code`: shape-validated, then a single atomic insert.
    ///   A collision is final ([`AppError::CodeAlreadyExists`]); custom codes
    ///   are user intent, not negotiable.
    /// - Without: generated candidates are inserted until one sticks, up to
    ///   [`MAX_GENERATE_ATTEMPTS`], then [`AppError::AllocationExhausted`].
    ///
    /// `security_score` and `category` are computed by the caller before
    /// allocation and stored immutably on the new entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`], [`AppError::InvalidCodeFormat`],
    /// [`AppError::CodeAlreadyExists`], [`AppError::AllocationExhausted`], or
    /// [`AppError::Internal`].
    pub async fn allocate(
        &self,
        destination_url: &str,
        custom_code: Option<String>,
        security_score: i32,
        category: Option<String>,
    ) -> Result<Allocation, AppError> {
        let destination = ensure_http_url(destination_url)
            .map_err(|e| AppError::invalid_url(e.to_string(), json!({ "url": destination_url })))?;

        if let Some(existing) = self.repository.find_by_destination(&destination).await? {
            return Ok(Allocation::Existing(existing));
        }

        if let Some(custom) = custom_code {
            if !base62::is_valid_custom_code(&custom) {
                return Err(AppError::invalid_code_format(
                    "Custom code must be 6-8 alphanumeric characters",
                    json!({ "code": custom }),
                ));
            }

            return self
                .insert(NewLinkEntry {
                    code: custom,
                    destination_url: destination,
                    category,
                    security_score,
                })
                .await;
        }

        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let candidate = base62::generate();

            match self
                .repository
                .insert_if_absent(NewLinkEntry {
                    code: candidate.clone(),
                    destination_url: destination.clone(),
                    category: category.clone(),
                    security_score,
                })
                .await?
            {
                InsertOutcome::Created(entry) => return Ok(Allocation::Created(entry)),
                InsertOutcome::DuplicateCode => {
                    debug!(code = %candidate, attempt, "generated code collided, retrying");
                }
                InsertOutcome::DuplicateUrl => {
                    return self.existing_by_destination(&destination).await;
                }
            }
        }

        Err(AppError::allocation_exhausted(MAX_GENERATE_ATTEMPTS))
    }

    /// Resolves a short code to its entry. Pure lookup, no side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry matches the code.
    pub async fn resolve(&self, code: &str) -> Result<LinkEntry, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Reports whether a code is currently registered.
    pub async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.repository.find_by_code(code).await?.is_some())
    }

    /// Deletes an entry together with all of its click events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry matches the code.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if self.repository.delete(code).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ))
        }
    }

    /// Lists entries newest-first with the total count for pagination.
    pub async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<LinkEntry>, i64), AppError> {
        let entries = self.repository.list(page, page_size).await?;
        let total = self.repository.count().await?;
        Ok((entries, total))
    }

    /// Counts all registered entries.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    async fn insert(&self, new_link: NewLinkEntry) -> Result<Allocation, AppError> {
        let code = new_link.code.clone();
        let destination = new_link.destination_url.clone();

        match self.repository.insert_if_absent(new_link).await? {
            InsertOutcome::Created(entry) => Ok(Allocation::Created(entry)),
            InsertOutcome::DuplicateCode => Err(AppError::code_already_exists(&code)),
            InsertOutcome::DuplicateUrl => self.existing_by_destination(&destination).await,
        }
    }

    /// Re-reads the entry that won a destination insert race.
    async fn existing_by_destination(&self, destination: &str) -> Result<Allocation, AppError> {
        self.repository
            .find_by_destination(destination)
            .await?
            .map(Allocation::Existing)
            .ok_or_else(|| {
                AppError::internal(
                    "Entry vanished after destination conflict",
                    json!({ "destination_url": destination }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn test_entry(id: i64, code: &str, url: &str) -> LinkEntry {
        LinkEntry {
            id,
            code: code.to_string(),
            destination_url: url.to_string(),
            category: None,
            security_score: 85,
            click_count: 0,
            last_clicked_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_allocate_generated_code_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_if_absent()
            .withf(|new_link| base62::is_valid_custom_code(&new_link.code))
            .times(1)
            .returning(|new_link| {
                Ok(InsertOutcome::Created(test_entry(
                    1,
                    &new_link.code,
                    &new_link.destination_url,
                )))
            });

        let service = LinkService::new(Arc::new(mock_repo));

        let allocation = service
            .allocate("https://example.com/a", None, 85, None)
            .await
            .unwrap();

        assert!(matches!(allocation, Allocation::Created(_)));
        assert_eq!(allocation.entry().destination_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_allocate_deduplicates_by_destination() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = test_entry(5, "abc123", "https://example.com/a");
        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_insert_if_absent().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let allocation = service
            .allocate("https://example.com/a", None, 85, None)
            .await
            .unwrap();

        assert!(matches!(allocation, Allocation::Existing(_)));
        assert_eq!(allocation.entry().code, "abc123");
    }

    #[tokio::test]
    async fn test_dedup_takes_priority_over_invalid_custom_code() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = test_entry(5, "abc123", "https://example.com/a");
        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = LinkService::new(Arc::new(mock_repo));

        // The custom code is invalid, but the destination already exists:
        // dedup wins and no validation error surfaces.
        let allocation = service
            .allocate(
                "https://example.com/a",
                Some("bad code!".to_string()),
                85,
                None,
            )
            .await
            .unwrap();

        assert!(matches!(allocation, Allocation::Existing(_)));
    }

    #[tokio::test]
    async fn test_allocate_invalid_url() {
        let mock_repo = MockLinkRepository::new();
        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.allocate("not-a-url", None, 85, None).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_allocate_rejects_non_http_scheme() {
        let mock_repo = MockLinkRepository::new();
        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.allocate("ftp://example.com", None, 85, None).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_allocate_custom_code_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_if_absent()
            .withf(|new_link| new_link.code == "short1")
            .times(1)
            .returning(|new_link| {
                Ok(InsertOutcome::Created(test_entry(
                    1,
                    &new_link.code,
                    &new_link.destination_url,
                )))
            });

        let service = LinkService::new(Arc::new(mock_repo));

        let allocation = service
            .allocate(
                "https://example.com/a",
                Some("short1".to_string()),
                85,
                None,
            )
            .await
            .unwrap();

        assert_eq!(allocation.entry().code, "short1");
    }

    #[tokio::test]
    async fn test_allocate_custom_code_invalid_shape() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_destination()
            .returning(|_| Ok(None));
        mock_repo.expect_insert_if_absent().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        for bad in ["abc", "waytoolong1", "has-dash"] {
            let result = service
                .allocate("https://example.com/a", Some(bad.to_string()), 85, None)
                .await;

            assert!(
                matches!(result.unwrap_err(), AppError::InvalidCodeFormat { .. }),
                "expected InvalidCodeFormat for {bad}"
            );
        }
    }

    #[tokio::test]
    async fn test_allocate_custom_code_conflict_is_final() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(|_| Ok(None));

        // Exactly one insert attempt: custom codes are never retried.
        mock_repo
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(InsertOutcome::DuplicateCode));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .allocate(
                "https://example.com/b",
                Some("short1".to_string()),
                85,
                None,
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::CodeAlreadyExists { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_retries_generated_collisions() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(|_| Ok(None));

        let mut remaining_collisions = 2;
        mock_repo
            .expect_insert_if_absent()
            .times(3)
            .returning(move |new_link| {
                if remaining_collisions > 0 {
                    remaining_collisions -= 1;
                    Ok(InsertOutcome::DuplicateCode)
                } else {
                    Ok(InsertOutcome::Created(test_entry(
                        1,
                        &new_link.code,
                        &new_link.destination_url,
                    )))
                }
            });

        let service = LinkService::new(Arc::new(mock_repo));

        let allocation = service
            .allocate("https://example.com/a", None, 85, None)
            .await
            .unwrap();

        assert!(matches!(allocation, Allocation::Created(_)));
    }

    #[tokio::test]
    async fn test_allocate_exhausts_after_five_attempts() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_if_absent()
            .times(5)
            .returning(|_| Ok(InsertOutcome::DuplicateCode));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .allocate("https://example.com/a", None, 85, None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::AllocationExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_resolves_lost_destination_race() {
        let mut mock_repo = MockLinkRepository::new();

        // Dedup lookup sees nothing, but the insert loses the race on the
        // destination index to a concurrent allocator.
        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(InsertOutcome::DuplicateUrl));

        let winner = test_entry(9, "winner1", "https://example.com/a");
        mock_repo
            .expect_find_by_destination()
            .times(1)
            .returning(move |_| Ok(Some(winner.clone())));

        let service = LinkService::new(Arc::new(mock_repo));

        let allocation = service
            .allocate("https://example.com/a", None, 85, None)
            .await
            .unwrap();

        assert!(matches!(allocation, Allocation::Existing(_)));
        assert_eq!(allocation.entry().code, "winner1");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.resolve("missing").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_exists() {
        let mut mock_repo = MockLinkRepository::new();
        let entry = test_entry(1, "abc123", "https://example.com/a");
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .returning(move |_| Ok(Some(entry.clone())));
        mock_repo
            .expect_find_by_code()
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        assert!(service.exists("abc123").await.unwrap());
        assert!(!service.exists("nothere").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.delete("missing").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
