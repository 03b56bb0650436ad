//! DTOs for link creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::LinkEntry;

/// Request to shorten a URL.
///
/// The custom code is deliberately NOT shape-validated here: the registry
/// owns that rule and reports it as `invalid_code_format`, distinct from
/// request-body validation errors.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The destination URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional custom short code (6-8 alphanumeric characters).
    pub custom_code: Option<String>,
}

/// JSON representation of a link entry.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub security_score: i32,
    pub click_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_entry(entry: &LinkEntry, short_url: String) -> Self {
        Self {
            code: entry.code.clone(),
            short_url,
            long_url: entry.destination_url.clone(),
            category: entry.category.clone(),
            security_score: entry.security_score,
            click_count: entry.click_count,
            last_clicked_at: entry.last_clicked_at,
            created_at: entry.created_at,
        }
    }
}
