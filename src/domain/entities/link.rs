//! Link entry representing one short-code mapping.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A short-code to destination-URL mapping with its aggregate click stats.
///
/// `code`, `destination_url`, `category`, and `security_score` are immutable
/// once created. `click_count` and `last_clicked_at` are mutated only by the
/// click ledger, one atomic transaction per recorded click.
#[derive(Debug, Clone, FromRow)]
pub struct LinkEntry {
    pub id: i64,
    pub code: String,
    pub destination_url: String,
    pub category: Option<String>,
    pub security_score: i32,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkEntry {
    /// Returns true if the entry has never been resolved through a redirect.
    pub fn never_clicked(&self) -> bool {
        self.click_count == 0
    }
}

/// Input data for allocating a new link entry.
///
/// The score and category are computed by the caller before allocation;
/// `click_count` starts at zero and `created_at` is set by the database.
#[derive(Debug, Clone)]
pub struct NewLinkEntry {
    pub code: String,
    pub destination_url: String,
    pub category: Option<String>,
    pub security_score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(click_count: i64) -> LinkEntry {
        LinkEntry {
            id: 1,
            code: "abc123".to_string(),
            destination_url: "https://example.com/".to_string(),
            category: Some("Technology".to_string()),
            security_score: 85,
            click_count,
            last_clicked_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_never_clicked() {
        assert!(entry(0).never_clicked());
        assert!(!entry(3).never_clicked());
    }

    #[test]
    fn test_new_link_entry_fields() {
        let new_link = NewLinkEntry {
            code: "xyz789".to_string(),
            destination_url: "https://rust-lang.org/".to_string(),
            category: None,
            security_score: 90,
        };

        assert_eq!(new_link.code, "xyz789");
        assert_eq!(new_link.destination_url, "https://rust-lang.org/");
        assert!(new_link.category.is_none());
        assert_eq!(new_link.security_score, 90);
    }
}
