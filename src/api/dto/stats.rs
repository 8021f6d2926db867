//! DTOs for per-link statistics and the history listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;
use crate::utils::extract_domain::short_url;

/// Public view of one record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlInfo {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl UrlInfo {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &record.code),
            short_code: record.code,
            long_url: record.target,
            click_count: record.click_count,
            created_at: record.created_at,
            last_accessed: record.last_accessed_at,
        }
    }
}

/// `GET /api/stats/{code}` response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub url: UrlInfo,
}

/// `GET /api/urls` response, newest first.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub success: bool,
    pub urls: Vec<UrlInfo>,
    pub total: usize,
}

/// `DELETE /api/urls/{code}` response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}
