//! DTOs for the paginated link listing.

use serde::{Deserialize, Serialize};

use super::shorten::LinkResponse;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListLinksQuery {
    /// Returns sanitized (page, limit).
    pub fn sanitize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, limit)
    }
}

/// Paginated link listing.
#[derive(Debug, Serialize)]
pub struct ListLinksResponse {
    pub links: Vec<LinkResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_defaults() {
        let query = ListLinksQuery {
            page: None,
            limit: None,
        };
        assert_eq!(query.sanitize(), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_sanitize_clamps() {
        let query = ListLinksQuery {
            page: Some(0),
            limit: Some(5_000),
        };
        assert_eq!(query.sanitize(), (1, MAX_PAGE_SIZE));
    }
}
