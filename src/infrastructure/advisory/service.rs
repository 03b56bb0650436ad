//! Advisory oracle trait.

use async_trait::async_trait;

/// Assessment returned by the external advisory service.
#[derive(Debug, Clone)]
pub struct AdvisoryAssessment {
    pub safe: bool,
    pub score: u8,
    pub reason: Option<String>,
}

/// Optional external scoring/labelling service.
///
/// Strictly best-effort and never authoritative: implementations return
/// `None` on any transport error, timeout, or malformed response, and the
/// deterministic heuristic result stands unchanged. Core behavior and tests
/// must not depend on an oracle being present.
///
/// # Implementations
///
/// - [`crate::infrastructure::advisory::HttpOracle`] - HTTP-backed oracle
/// - [`crate::infrastructure::advisory::NullOracle`] - always absent
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvisoryOracle: Send + Sync {
    /// Asks the oracle to assess a URL for safety.
    ///
    /// Returns `None` when the oracle is unavailable or its response is
    /// unusable.
    async fn assess(&self, url: &str) -> Option<AdvisoryAssessment>;

    /// Asks the oracle for a category label for a URL.
    ///
    /// The label is advisory only; `None` when unavailable.
    async fn categorize(&self, url: &str) -> Option<String>;
}
