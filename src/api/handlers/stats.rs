//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::shorten::LinkResponse;
use crate::api::dto::stats::StatsResponse;
use crate::application::services::{DEFAULT_DAYS, DEFAULT_RECENT_LIMIT};
use crate::error::AppError;
use crate::state::AppState;

/// Returns statistics for a short link.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Response
///
/// The entry itself (including its aggregate `click_count` and
/// `last_clicked_at`), a dense 7-day daily histogram, a sparse hour-of-day
/// histogram, and up to 100 most recent click events.
///
/// Histograms are recomputed per query over the configured window of recent
/// events; they are not persisted.
///
/// # Errors
///
/// Returns 404 when the code is unknown.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let entry = state.link_service.resolve(&code).await?;

    let daily = state.analytics.daily_histogram(&code, DEFAULT_DAYS).await?;
    let hourly = state.analytics.hourly_histogram(&code).await?;
    let recent = state.ledger.list_recent(&code, DEFAULT_RECENT_LIMIT).await?;

    let short_url = state.short_url(&entry.code);

    Ok(Json(StatsResponse {
        link: LinkResponse::from_entry(&entry, short_url),
        daily: daily.into_iter().map(Into::into).collect(),
        hourly: hourly.into_iter().map(Into::into).collect(),
        recent: recent.iter().map(Into::into).collect(),
    }))
}
