//! URL record entity: one short code mapped to one target URL.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// `code` is unique across all live records and `target` is a normalized
/// absolute http(s) URL. Only the resolver mutates a record after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub code: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl UrlRecord {
    /// Creates a fresh record with a zero counter and no access yet.
    pub fn new(code: String, target: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            target,
            created_at,
            click_count: 0,
            last_accessed_at: None,
        }
    }

    /// Counts one redirect that happened at `at`.
    pub fn record_click(&mut self, at: DateTime<Utc>) {
        self.click_count = self.click_count.saturating_add(1);
        self.last_accessed_at = Some(at);
    }
}
