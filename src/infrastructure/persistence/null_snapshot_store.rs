//! No-op snapshot store for memory-only deployments.

use crate::domain::repositories::SnapshotStore;
use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;
use tracing::debug;

/// A snapshot store that keeps nothing.
///
/// Used when `DATA_FILE` is empty and in tests. Loads are always empty and
/// saves always succeed.
pub struct NullSnapshotStore;

impl NullSnapshotStore {
    pub fn new() -> Self {
        debug!("Using NullSnapshotStore (persistence disabled)");
        Self
    }
}

impl Default for NullSnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStore for NullSnapshotStore {
    async fn load(&self) -> Result<Vec<UrlRecord>, AppError> {
        Ok(Vec::new())
    }

    async fn save(&self, _records: &[UrlRecord]) -> Result<(), AppError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "memory only".to_string()
    }
}
