//! API route configuration.

use crate::api::handlers::{
    availability_handler, create_link_handler, delete_link_handler, list_links_handler,
    stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// REST API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`                   - Create a short link
/// - `GET    /links`                   - Paginated link listing
/// - `GET    /links/{code}`            - Entry, histograms, and recent clicks
/// - `GET    /links/{code}/available`  - Custom-code availability check
/// - `DELETE /links/{code}`            - Delete a link and its click events
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route(
            "/links/{code}",
            get(stats_handler).delete(delete_link_handler),
        )
        .route("/links/{code}/available", get(availability_handler))
}
