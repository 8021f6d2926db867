//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Uri},
};
use tracing::error;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_domain::short_url;

/// Creates (or reuses) a short code for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "example.com/some/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "shortCode": "aB3dE9",
///   "shortUrl": "http://localhost:3000/aB3dE9",
///   "longUrl": "https://example.com/some/page",
///   "clickCount": 0,
///   "createdAt": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// The mapping is persisted only when a new code was minted. If that write
/// fails the new code is removed again, so a failed call leaves nothing behind
/// and a retry mints and persists afresh.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or not http(s).
/// Returns 503 Service Unavailable if the snapshot cannot be written.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let base_url = state.public_base_url(&headers, &uri)?;

    let allocation = state.link_service.shorten(&payload.long_url).await?;

    if allocation.created
        && let Err(e) = state.snapshot_service.persist().await
    {
        let code = &allocation.record.code;
        if let Err(rollback) = state.link_service.delete(code).await {
            error!(code, error = %rollback, "Failed to roll back unsaved short code");
        }
        return Err(e);
    }

    let record = allocation.record;

    Ok(Json(ShortenResponse {
        success: true,
        short_url: short_url(&base_url, &record.code),
        short_code: record.code,
        long_url: record.target,
        click_count: record.click_count,
        created_at: record.created_at,
    }))
}
