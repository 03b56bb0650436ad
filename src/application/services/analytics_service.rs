//! Read-only analytics over the click ledger.
//!
//! Histograms are recomputed per query from the most recent events, bounded
//! by the configured window. Nothing is cached or persisted: staleness is
//! limited to events older than the window, which simply do not contribute.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use serde_json::json;

use crate::domain::entities::Click;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Default number of day buckets in the daily histogram.
pub const DEFAULT_DAYS: u32 = 7;

/// One day bucket, labelled `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub label: String,
    pub count: u64,
}

/// One hour-of-day bucket, labelled `HH:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourBucket {
    pub label: String,
    pub count: u64,
}

/// Aggregator bucketing recent click events into histograms.
pub struct AnalyticsService<C: ClickRepository> {
    repository: Arc<C>,
    /// Maximum number of recent events considered per query.
    window: i64,
}

impl<C: ClickRepository> AnalyticsService<C> {
    pub fn new(repository: Arc<C>, window: i64) -> Self {
        Self { repository, window }
    }

    /// Builds `days` consecutive local calendar-day buckets ending today,
    /// oldest first. Days without events appear with count 0, so charts get a
    /// dense, stable sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry exists for the code.
    pub async fn daily_histogram(&self, code: &str, days: u32) -> Result<Vec<DayBucket>, AppError> {
        let times = self.local_event_times(code).await?;
        Ok(bucket_daily(&times, Local::now().date_naive(), days))
    }

    /// Aggregates events into hour-of-day buckets (0-23) across the whole
    /// window. Sparse: hours without events are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry exists for the code.
    pub async fn hourly_histogram(&self, code: &str) -> Result<Vec<HourBucket>, AppError> {
        let times = self.local_event_times(code).await?;
        Ok(bucket_hourly(&times))
    }

    /// Fetches the event window and converts timestamps to local wall time.
    async fn local_event_times(&self, code: &str) -> Result<Vec<NaiveDateTime>, AppError> {
        let events: Vec<Click> = self
            .repository
            .list_recent(code, self.window)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        Ok(events
            .iter()
            .map(|c| c.occurred_at.with_timezone(&Local).naive_local())
            .collect())
    }
}

/// Dense daily bucketing: exactly `days` entries, oldest first, zero-filled.
fn bucket_daily(times: &[NaiveDateTime], today: NaiveDate, days: u32) -> Vec<DayBucket> {
    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for t in times {
        *counts.entry(t.date()).or_default() += 1;
    }

    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DayBucket {
                label: date.format("%Y-%m-%d").to_string(),
                count: counts.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Sparse hourly bucketing: present hours only, ascending.
fn bucket_hourly(times: &[NaiveDateTime]) -> Vec<HourBucket> {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for t in times {
        *counts.entry(t.time().hour()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(hour, count)| HourBucket {
            label: format!("{hour:02}:00"),
            count,
        })
        .collect()
}
