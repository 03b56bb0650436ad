//! Background worker draining the click event channel.
//!
//! The redirect handler never waits on the ledger write; events flow through
//! a bounded channel into this worker, which persists them with a short
//! retry budget for transient database failures. A failure here is an
//! operational error (logged, counted), never a redirect failure.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, error};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

const RETRY_INTERVAL_MS: u64 = 200;
/// Retries after the initial attempt.
const RETRY_COUNT: usize = 2;

/// Drains click events until the channel closes.
///
/// Each event is recorded through [`ClickRepository::record`], which commits
/// the event append and the counter bump as one transaction. `NotFound` is
/// not retried: the link was deleted between redirect and write, and the
/// ledger must record nothing for it.
pub async fn run_click_worker<C: ClickRepository>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<C>,
) {
    while let Some(event) = rx.recv().await {
        let new_click = NewClick {
            code: event.code.clone(),
            fingerprint: event.fingerprint,
            user_agent: event.user_agent,
            referer: event.referer,
        };

        let strategy = FixedInterval::from_millis(RETRY_INTERVAL_MS).take(RETRY_COUNT);
        let result = RetryIf::spawn(
            strategy,
            || {
                let repository = repository.clone();
                let new_click = new_click.clone();
                async move { repository.record(new_click).await }
            },
            is_transient,
        )
        .await;

        match result {
            Ok(click) => {
                metrics::counter!("linkcut_clicks_recorded_total").increment(1);
                debug!(code = %event.code, click_id = click.id, "click recorded");
            }
            Err(AppError::NotFound { .. }) => {
                metrics::counter!("linkcut_clicks_discarded_total").increment(1);
                debug!(code = %event.code, "click discarded: link no longer exists");
            }
            Err(e) => {
                metrics::counter!("linkcut_clicks_failed_total").increment(1);
                error!(code = %event.code, error = %e, "click ledger write failed");
            }
        }
    }

    debug!("click worker stopped: channel closed");
}

fn is_transient(e: &AppError) -> bool {
    !matches!(e, AppError::NotFound { .. })
}
