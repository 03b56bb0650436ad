//! Handlers for link listing, availability, and deletion.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use crate::api::dto::links_list::{ListLinksQuery, ListLinksResponse};
use crate::api::dto::shorten::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub code: String,
    pub available: bool,
}

/// Lists links newest-first with pagination.
///
/// # Endpoint
///
/// `GET /api/links?page=1&limit=10`
pub async fn list_links_handler(
    Query(query): Query<ListLinksQuery>,
    State(state): State<AppState>,
) -> Result<Json<ListLinksResponse>, AppError> {
    let (page, limit) = query.sanitize();

    let (entries, total) = state.link_service.list(page, limit).await?;

    let links = entries
        .iter()
        .map(|entry| LinkResponse::from_entry(entry, state.short_url(&entry.code)))
        .collect();

    Ok(Json(ListLinksResponse {
        links,
        total,
        page,
        limit,
        total_pages: (total as u64).div_ceil(limit as u64) as i64,
    }))
}

/// Reports whether a code is free to claim as a custom code.
///
/// # Endpoint
///
/// `GET /api/links/{code}/available`
pub async fn availability_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let exists = state.link_service.exists(&code).await?;

    Ok(Json(AvailabilityResponse {
        code,
        available: !exists,
    }))
}

/// Deletes a short link and every click event it owns.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// The cascade is transactional: after deletion no orphaned events remain
/// queryable. The redirect cache entry for the code is invalidated so stale
/// redirects stop at once.
///
/// # Errors
///
/// Returns 404 when the code is unknown.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete(&code).await?;
    state.cache.invalidate(&code).await;

    Ok(Json(DeleteResponse {
        message: "Link deleted successfully".to_string(),
    }))
}
