//! Durability collaborator: whole-mapping load and save.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Loads and saves the complete mapping.
///
/// The core never calls this directly. [`crate::application::services::SnapshotService`]
/// drives it around mutating operations.
///
/// # Errors
///
/// Implementations report I/O and decoding failures as
/// [`AppError::StorageUnavailable`] and never retry on their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the last saved mapping. A store that has never been written
    /// returns an empty list.
    async fn load(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Overwrites the saved mapping with `records`.
    async fn save(&self, records: &[UrlRecord]) -> Result<(), AppError>;

    /// Short label used in logs and health output.
    fn describe(&self) -> String;
}
