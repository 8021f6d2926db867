//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// The URL may omit its scheme; `https://` is assumed.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2048, message = "URL is required"))]
    pub long_url: String,
}

/// Result of a shorten call.
///
/// Re-shortening a known URL returns the existing code and its current
/// click count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub success: bool,
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
}
