//! API route configuration.

use crate::api::handlers::{
    api_not_found_handler, delete_url_handler, health_handler, list_urls_handler,
    shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// JSON API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`       - Create or reuse a short code
/// - `GET    /stats/{code}`  - Link details without counting a click
/// - `GET    /urls`          - All links, newest first
/// - `DELETE /urls/{code}`   - Remove a link
/// - `GET    /health`        - Liveness and basic facts
///
/// Any other path under `/api` gets a JSON 404.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/urls", get(list_urls_handler))
        .route("/urls/{code}", delete(delete_url_handler))
        .route("/health", get(health_handler))
        .fallback(api_not_found_handler)
}
