//! Repository trait for the code → record mapping.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result of an attempted insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was stored.
    Inserted,
    /// Another record already holds this target; nothing was stored.
    TargetExists(UrlRecord),
    /// The candidate code is taken by a different target; nothing was stored.
    CodeTaken,
}

/// Storage interface for URL records.
///
/// Every method is atomic with respect to the others. In particular
/// [`UrlRepository::insert`] checks both the code and the target under the
/// same critical section, and [`UrlRepository::record_click`] never loses an
/// increment under concurrent calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - in-process map with a target index
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a record by its short code.
    async fn get(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds the record that already maps `target`, if any.
    ///
    /// Matching is exact string equality on the normalized URL.
    async fn find_by_target(&self, target: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Stores `record` unless its code or its target is already present.
    async fn insert(&self, record: UrlRecord) -> Result<InsertOutcome, AppError>;

    /// Increments the click counter of `code` and stamps the access time.
    ///
    /// Returns the updated record, or `None` when the code is unknown (in which
    /// case nothing changes).
    async fn record_click(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<UrlRecord>, AppError>;

    /// Removes the record for `code` and returns it, or `None` if absent.
    async fn delete(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Number of live records.
    async fn count(&self) -> Result<usize, AppError>;

    /// Copies out every record, in no particular order.
    async fn snapshot(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Replaces the whole mapping with `records`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if two records share a code or a target;
    /// the existing mapping is left untouched in that case.
    async fn replace_all(&self, records: Vec<UrlRecord>) -> Result<(), AppError>;
}
