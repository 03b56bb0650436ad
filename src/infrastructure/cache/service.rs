//! Redirect cache trait.

use async_trait::async_trait;

/// Cache for code → destination-URL lookups on the redirect hot path.
///
/// Entries are immutable once created (a code never changes its destination),
/// so the only invalidation trigger is deletion. All implementations are
/// fail-open: a broken cache degrades to database lookups, never to request
/// failures.
#[async_trait]
pub trait RedirectCache: Send + Sync {
    /// Returns the cached destination for a code, or `None` on miss or error.
    async fn get(&self, code: &str) -> Option<String>;

    /// Stores a code → destination mapping. Errors are swallowed and logged.
    async fn set(&self, code: &str, destination_url: &str);

    /// Drops the cached mapping for a deleted code.
    async fn invalidate(&self, code: &str);

    /// Reports whether the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
