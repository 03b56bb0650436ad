//! HTTP-backed advisory oracle client.

use super::service::{AdvisoryAssessment, AdvisoryOracle};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Categories the oracle may assign; anything else maps to `Other`.
const VALID_CATEGORIES: &[&str] = &[
    "News",
    "E-commerce",
    "Documentation",
    "Social Media",
    "Entertainment",
    "Education",
    "Business",
    "Technology",
    "Other",
];

#[derive(Debug, Deserialize)]
struct AssessResponse {
    safe: bool,
    score: f64,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategorizeResponse {
    category: String,
}

/// Client for an external advisory service speaking a small JSON protocol:
/// `POST {base}/assess` and `POST {base}/categorize`, both taking
/// `{"url": "..."}`.
///
/// Every failure mode — connect error, timeout, non-2xx status, malformed
/// body — degrades to `None`; nothing here can fail an allocation on its own.
pub struct HttpOracle {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOracle {
    /// Builds the client with a hard per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout_ms: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        info!("Advisory oracle enabled at {}", base_url);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<T: serde::de::DeserializeOwned>(&self, path: &str, url: &str) -> Option<T> {
        let endpoint = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .post(&endpoint)
            .json(&json!({ "url": url }))
            .send()
            .await
            .map_err(|e| warn!(error = %e, endpoint, "advisory request failed"))
            .ok()?;

        if !response.status().is_success() {
            warn!(status = %response.status(), endpoint, "advisory returned non-success status");
            return None;
        }

        response
            .json::<T>()
            .await
            .map_err(|e| warn!(error = %e, endpoint, "advisory returned malformed response"))
            .ok()
    }
}

#[async_trait]
impl AdvisoryOracle for HttpOracle {
    async fn assess(&self, url: &str) -> Option<AdvisoryAssessment> {
        let response: AssessResponse = self.post_json("assess", url).await?;

        if !response.score.is_finite() {
            warn!("advisory returned a non-finite score");
            return None;
        }

        let score = response.score.round().clamp(0.0, 100.0) as u8;
        debug!(url, score, safe = response.safe, "advisory assessment");

        Some(AdvisoryAssessment {
            safe: response.safe,
            score,
            reason: response.reason,
        })
    }

    async fn categorize(&self, url: &str) -> Option<String> {
        let response: CategorizeResponse = self.post_json("categorize", url).await?;
        let category = response.category.trim();

        if VALID_CATEGORIES.contains(&category) {
            Some(category.to_string())
        } else {
            Some("Other".to_string())
        }
    }
}
