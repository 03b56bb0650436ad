//! Shared application state injected into all handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    AnalyticsService, ClickLedgerService, LinkService, SecurityScorer,
};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::advisory::AdvisoryOracle;
use crate::infrastructure::cache::RedirectCache;
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::utils::fingerprint::Fingerprinter;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub ledger: Arc<ClickLedgerService<PgClickRepository>>,
    pub analytics: Arc<AnalyticsService<PgClickRepository>>,
    pub scorer: Arc<SecurityScorer>,
    pub oracle: Arc<dyn AdvisoryOracle>,
    pub cache: Arc<dyn RedirectCache>,
    pub click_tx: mpsc::Sender<ClickEvent>,
    pub fingerprinter: Fingerprinter,
    pub base_url: String,
    pub behind_proxy: bool,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        link_service: Arc<LinkService<PgLinkRepository>>,
        ledger: Arc<ClickLedgerService<PgClickRepository>>,
        analytics: Arc<AnalyticsService<PgClickRepository>>,
        scorer: Arc<SecurityScorer>,
        oracle: Arc<dyn AdvisoryOracle>,
        cache: Arc<dyn RedirectCache>,
        click_tx: mpsc::Sender<ClickEvent>,
        fingerprinter: Fingerprinter,
        base_url: String,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service,
            ledger,
            analytics,
            scorer,
            oracle,
            cache,
            click_tx,
            fingerprinter,
            base_url: base_url.trim_end_matches('/').to_string(),
            behind_proxy,
        }
    }

    /// Renders the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
