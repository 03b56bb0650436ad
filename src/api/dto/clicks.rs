//! DTOs for individual click events.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Click;

/// JSON representation of one click event.
///
/// `fingerprint` is already an opaque hash; exposing it allows rough
/// distinct-visitor counting without revealing any address.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub occurred_at: DateTime<Utc>,
    pub fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
}

impl From<&Click> for ClickInfo {
    fn from(click: &Click) -> Self {
        Self {
            occurred_at: click.occurred_at,
            fingerprint: click.fingerprint.clone(),
            user_agent: click.user_agent.clone(),
            referer: click.referer.clone(),
        }
    }
}
