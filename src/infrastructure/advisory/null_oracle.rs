//! No-op advisory oracle for deployments without an external service.

use super::service::{AdvisoryAssessment, AdvisoryOracle};
use async_trait::async_trait;
use tracing::debug;

/// An oracle that is always absent.
///
/// Used when no advisory endpoint is configured or the configured one cannot
/// be reached at startup. The heuristic scorer carries the full verdict.
pub struct NullOracle;

impl NullOracle {
    pub fn new() -> Self {
        debug!("Using NullOracle (advisory scoring disabled)");
        Self
    }
}

impl Default for NullOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdvisoryOracle for NullOracle {
    async fn assess(&self, _url: &str) -> Option<AdvisoryAssessment> {
        None
    }

    async fn categorize(&self, _url: &str) -> Option<String> {
        None
    }
}
