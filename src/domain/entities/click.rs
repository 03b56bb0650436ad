//! Click entity representing a single recorded redirect.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One immutable record of a redirect through a short link.
///
/// `fingerprint` is a keyed hash of the client network address; the raw
/// address is never stored. Events are created exactly once per resolved
/// redirect and never mutated afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub occurred_at: DateTime<Utc>,
    pub fingerprint: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Input data for recording a new click event.
///
/// Keyed by short code: the ledger resolves the owning link inside the same
/// transaction that appends the event and bumps the counter.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub code: String,
    pub fingerprint: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}
