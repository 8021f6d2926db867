//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, Uri},
};

use crate::api::dto::stats::{StatsResponse, UrlInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Returns a link's target and counters without counting a click.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<StatsResponse>, AppError> {
    let record = state.link_service.stats(&code).await?;
    let base_url = state.public_base_url(&headers, &uri)?;

    Ok(Json(StatsResponse {
        success: true,
        url: UrlInfo::from_record(record, &base_url),
    }))
}
