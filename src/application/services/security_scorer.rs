//! Deterministic URL safety scoring with optional advisory refinement.
//!
//! The heuristic is a fixed point budget over independent static signals,
//! summing to at most 100. It is fully deterministic; the advisory oracle can
//! refine a borderline verdict but its absence never changes core behavior.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::infrastructure::advisory::AdvisoryOracle;

/// Heuristic scores below this consult the advisory oracle.
const ADVISORY_THRESHOLD: u8 = 70;

/// Scores at or above this are considered safe.
const SAFE_THRESHOLD: u8 = 50;

/// Well-known hostnames awarded the full domain budget, matched exactly or as
/// a parent of the URL's host.
const KNOWN_DOMAINS: &[&str] = &[
    "google.com",
    "github.com",
    "stackoverflow.com",
    "microsoft.com",
    "amazon.com",
    "apple.com",
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "youtube.com",
    "wikipedia.org",
    "reddit.com",
    "medium.com",
    "dev.to",
    "vercel.app",
    "netlify.app",
    "nextjs.org",
    "reactjs.org",
    "nodejs.org",
];

/// Signals that mark a URL as suspicious: raw IP-literal hosts, known
/// shortener domains, phishing keyword substrings, percent-encoded sequences.
static SUSPICIOUS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}",
        r"(?i)bit\.ly|tinyurl|shorturl",
        r"(?i)login|signin|verify|account|secure|update",
        r"(?i)%[0-9a-f]{2}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Final scoring verdict. `safe == false` rejects the allocation upstream.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub safe: bool,
    pub score: u8,
    pub reason: Option<String>,
}

/// URL safety scorer.
pub struct SecurityScorer {
    oracle: Arc<dyn AdvisoryOracle>,
}

impl SecurityScorer {
    pub fn new(oracle: Arc<dyn AdvisoryOracle>) -> Self {
        Self { oracle }
    }

    /// Scores a URL in [0, 100] and derives a safety verdict.
    ///
    /// Heuristic scores below [`ADVISORY_THRESHOLD`] are refined by the
    /// oracle when one responds: the final score becomes the rounded mean of
    /// both scores and `safe` follows the advisory verdict. An absent or
    /// failing oracle leaves the heuristic result unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] for unparseable input.
    pub async fn score(&self, url: &str) -> Result<Verdict, AppError> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::invalid_url(e.to_string(), json!({ "url": url })))?;

        let heuristic = heuristic_score(&parsed, url);

        if heuristic < ADVISORY_THRESHOLD {
            if let Some(assessment) = self.oracle.assess(url).await {
                let blended =
                    ((u16::from(heuristic) + u16::from(assessment.score) + 1) / 2).min(100) as u8;
                debug!(url, heuristic, advisory = assessment.score, blended, "advisory blend");

                return Ok(Verdict {
                    safe: assessment.safe,
                    score: blended,
                    reason: assessment.reason,
                });
            }
        }

        let safe = heuristic >= SAFE_THRESHOLD;
        Ok(Verdict {
            safe,
            score: heuristic,
            reason: (!safe).then(|| "URL contains suspicious patterns".to_string()),
        })
    }
}

/// Computes the deterministic heuristic score for a parsed URL.
///
/// Point budget (sums to 100):
/// - https scheme: +20
/// - known domain: +25; unknown: +10 (unknown is not penalized as unsafe)
/// - total length <200: +15; <500: +10; else +5
/// - no suspicious pattern: +20; any present: +5
/// - hostname labels <=3: +10; <=4: +5
/// - path segments <=3: +10; <=5: +5
pub fn heuristic_score(url: &Url, raw: &str) -> u8 {
    let mut score: u32 = 0;

    if url.scheme() == "https" {
        score += 20;
    }

    let hostname = url.host_str().unwrap_or("").to_ascii_lowercase();
    let known = KNOWN_DOMAINS
        .iter()
        .any(|d| hostname == *d || hostname.ends_with(&format!(".{d}")));
    score += if known { 25 } else { 10 };

    score += match raw.len() {
        0..200 => 15,
        200..500 => 10,
        _ => 5,
    };

    let suspicious = SUSPICIOUS_PATTERNS.iter().any(|p| p.is_match(raw));
    score += if suspicious { 5 } else { 20 };

    score += match hostname.split('.').count() {
        0..=3 => 10,
        4 => 5,
        _ => 0,
    };

    let path_segments = url.path().split('/').filter(|s| !s.is_empty()).count();
    score += match path_segments {
        0..=3 => 10,
        4..=5 => 5,
        _ => 0,
    };

    score.min(100) as u8
}
