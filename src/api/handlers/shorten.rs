//! Handler for link creation.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{CreateLinkRequest, LinkResponse};
use crate::application::services::Allocation;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a destination URL.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Flow
///
/// 1. Validate the request body
/// 2. Score the destination; `safe = false` rejects with reason and score
/// 3. Ask the advisory oracle for a category label (best-effort)
/// 4. Allocate: dedup by destination, then custom-code insert or
///    generate-and-retry
///
/// # Response Codes
///
/// - **201 Created**: a new entry was allocated
/// - **200 OK**: the destination was already registered; the existing entry
///   is returned unchanged
///
/// # Errors
///
/// Returns 400 for invalid URLs, invalid custom codes, and unsafe URLs;
/// 409 when a custom code is taken; 503 when code generation exhausts its
/// retry budget.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let verdict = state.scorer.score(&payload.url).await?;
    if !verdict.safe {
        return Err(AppError::unsafe_url(
            verdict
                .reason
                .unwrap_or_else(|| "URL contains suspicious patterns".to_string()),
            verdict.score,
        ));
    }

    let category = state.oracle.categorize(&payload.url).await;

    let allocation = state
        .link_service
        .allocate(
            &payload.url,
            payload.custom_code,
            i32::from(verdict.score),
            category,
        )
        .await?;

    let status = match &allocation {
        Allocation::Created(_) => StatusCode::CREATED,
        Allocation::Existing(_) => StatusCode::OK,
    };

    let entry = allocation.into_entry();
    let short_url = state.short_url(&entry.code);

    Ok((status, Json(LinkResponse::from_entry(&entry, short_url))))
}
