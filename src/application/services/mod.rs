//! Application services orchestrating domain logic.

mod analytics_service;
mod ledger_service;
mod link_service;
mod security_scorer;

pub use analytics_service::{AnalyticsService, DEFAULT_DAYS, DayBucket, HourBucket};
pub use ledger_service::{ClickLedgerService, DEFAULT_RECENT_LIMIT};
pub use link_service::{Allocation, LinkService};
pub use security_scorer::{SecurityScorer, Verdict, heuristic_score};
