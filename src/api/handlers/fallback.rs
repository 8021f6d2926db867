//! Catch-all for unknown API paths.

use serde_json::json;

use crate::error::AppError;

/// Answers any unmatched `/api/*` path with the usual JSON error envelope.
pub async fn api_not_found_handler() -> AppError {
    AppError::not_found("API endpoint not found", json!({}))
}
