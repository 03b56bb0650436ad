//! Click event payload for asynchronous click tracking.

/// In-memory click event passed from the redirect handler to the background
/// worker via a bounded channel.
///
/// The handler does all per-request derivation up front (fingerprint hashing,
/// header extraction) so the worker only has to persist. Decoupling the write
/// from the response keeps redirect latency independent of ledger-write
/// latency.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub fingerprint: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    pub fn new(
        code: String,
        fingerprint: String,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            code,
            fingerprint,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}
