//! DTOs for per-link statistics.

use serde::Serialize;

use super::clicks::ClickInfo;
use super::shorten::LinkResponse;
use crate::application::services::{DayBucket, HourBucket};

/// One histogram bucket.
#[derive(Debug, Serialize)]
pub struct HistogramBucket {
    pub label: String,
    pub count: u64,
}

impl From<DayBucket> for HistogramBucket {
    fn from(bucket: DayBucket) -> Self {
        Self {
            label: bucket.label,
            count: bucket.count,
        }
    }
}

impl From<HourBucket> for HistogramBucket {
    fn from(bucket: HourBucket) -> Self {
        Self {
            label: bucket.label,
            count: bucket.count,
        }
    }
}

/// Statistics for one short link: the entry itself, dense daily and sparse
/// hourly histograms, and the most recent click events.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub daily: Vec<HistogramBucket>,
    pub hourly: Vec<HistogramBucket>,
    pub recent: Vec<ClickInfo>,
}
