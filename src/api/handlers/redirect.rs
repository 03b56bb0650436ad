//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use std::net::SocketAddr;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check the redirect cache; on miss, resolve through the registry and
///    populate the cache off the request path
/// 2. Hash the client address into a fingerprint and push a click event into
///    the bounded channel
/// 3. Return 307 immediately
///
/// The response never waits on the ledger write. A full queue drops the event
/// (logged and counted); a failed write is handled inside the worker. Neither
/// can fail the redirect.
///
/// # Errors
///
/// Returns 404 when the code is unknown.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    let destination = match state.cache.get(&code).await {
        Some(cached) => {
            debug!(code, "cache hit");
            cached
        }
        None => {
            let entry = state.link_service.resolve(&code).await?;

            // Mappings are immutable, so populating the cache can happen
            // off the request path without a staleness concern.
            let cache = state.cache.clone();
            let cache_code = code.clone();
            let cache_url = entry.destination_url.clone();
            tokio::spawn(async move {
                cache.set(&cache_code, &cache_url).await;
            });

            entry.destination_url
        }
    };

    let client_ip = extract_client_ip(&headers, addr, state.behind_proxy);
    let event = ClickEvent::new(
        code.clone(),
        state.fingerprinter.hash(&client_ip),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    if state.click_tx.try_send(event).is_err() {
        metrics::counter!("linkcut_clicks_dropped_total").increment(1);
        warn!(code, "click queue full, event dropped");
    }

    Ok(Redirect::temporary(&destination))
}
