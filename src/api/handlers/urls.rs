//! Handlers for the link history: listing and deletion.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, Uri},
};

use tracing::error;

use crate::api::dto::stats::{DeleteResponse, UrlInfo, UrlListResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every short link, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
pub async fn list_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<UrlListResponse>, AppError> {
    let base_url = state.public_base_url(&headers, &uri)?;

    let urls: Vec<UrlInfo> = state
        .link_service
        .list()
        .await?
        .into_iter()
        .map(|record| UrlInfo::from_record(record, &base_url))
        .collect();

    Ok(Json(UrlListResponse {
        success: true,
        total: urls.len(),
        urls,
    }))
}

/// Removes a short link.
///
/// # Endpoint
///
/// `DELETE /api/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the snapshot cannot be written; the
/// record is put back then, so a retry deletes it again.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = state.link_service.delete(&code).await?;

    if let Err(e) = state.snapshot_service.persist().await {
        if let Err(rollback) = state.link_service.reinstate(removed).await {
            error!(code, error = %rollback, "Failed to reinstate unsaved deletion");
        }
        return Err(e);
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "URL deleted successfully".to_string(),
    }))
}
