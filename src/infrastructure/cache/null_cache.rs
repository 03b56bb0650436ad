//! No-op cache for deployments without Redis.

use super::service::RedirectCache;
use async_trait::async_trait;
use tracing::debug;

/// A cache where every lookup misses.
///
/// Used when Redis is not configured or its connection fails at startup;
/// every redirect falls through to the database.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (redirect caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RedirectCache for NullCache {
    async fn get(&self, _code: &str) -> Option<String> {
        None
    }

    async fn set(&self, _code: &str, _destination_url: &str) {}

    async fn invalidate(&self, _code: &str) {}

    async fn health_check(&self) -> bool {
        true
    }
}
