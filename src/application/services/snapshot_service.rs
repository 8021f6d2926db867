//! Durability around the live mapping.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::domain::repositories::{SnapshotStore, UrlRepository};
use crate::error::AppError;

/// Loads the mapping at startup and writes it back after mutations.
///
/// Callers invoke [`SnapshotService::persist`] after every mutating
/// [`crate::application::services::LinkService`] call. Writes are serialized
/// and each one captures the mapping while holding the write lock, so the last
/// write on disk is never older than an earlier one.
pub struct SnapshotService<R: UrlRepository> {
    url_repository: Arc<R>,
    store: Arc<dyn SnapshotStore>,
    write_lock: Mutex<()>,
}

impl<R: UrlRepository> SnapshotService<R> {
    pub fn new(url_repository: Arc<R>, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            url_repository,
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Replaces the live mapping with the stored one. Returns the record count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] if the store cannot be read,
    /// and [`AppError::Internal`] if it holds duplicate codes or targets.
    pub async fn restore(&self) -> Result<usize, AppError> {
        let records = self.store.load().await?;
        let count = records.len();

        self.url_repository.replace_all(records).await?;

        info!(count, store = %self.store.describe(), "Restored short links");
        Ok(count)
    }

    /// Writes the current mapping to the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on write failure. The live
    /// mapping is unaffected; no retry is attempted.
    pub async fn persist(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let records = self.url_repository.snapshot().await?;
        self.store.save(&records).await.inspect_err(|e| {
            error!(error = %e, store = %self.store.describe(), "Failed to persist short links");
        })
    }

    /// Label of the backing store.
    pub fn describe(&self) -> String {
        self.store.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlRecord;
    use crate::domain::repositories::{MockSnapshotStore, MockUrlRepository};
    use chrono::Utc;
    use serde_json::json;

    fn create_test_record(code: &str, url: &str) -> UrlRecord {
        UrlRecord::new(code.to_string(), url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_restore_replaces_mapping() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_store = MockSnapshotStore::new();

        mock_store.expect_load().times(1).returning(|| {
            Ok(vec![
                create_test_record("abc123", "https://a.com"),
                create_test_record("def456", "https://b.com"),
            ])
        });
        mock_store
            .expect_describe()
            .returning(|| "mock".to_string());

        mock_repo
            .expect_replace_all()
            .withf(|records| records.len() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let service = SnapshotService::new(Arc::new(mock_repo), Arc::new(mock_store));

        assert_eq!(service.restore().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_restore_propagates_load_failure() {
        let mock_repo = MockUrlRepository::new();
        let mut mock_store = MockSnapshotStore::new();

        mock_store
            .expect_load()
            .returning(|| Err(AppError::storage("unreadable", json!({}))));

        let service = SnapshotService::new(Arc::new(mock_repo), Arc::new(mock_store));

        assert!(matches!(
            service.restore().await,
            Err(AppError::StorageUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_persist_saves_snapshot() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_store = MockSnapshotStore::new();

        mock_repo
            .expect_snapshot()
            .times(1)
            .returning(|| Ok(vec![create_test_record("abc123", "https://a.com")]));

        mock_store
            .expect_save()
            .withf(|records| records.len() == 1 && records[0].code == "abc123")
            .times(1)
            .returning(|_| Ok(()));

        let service = SnapshotService::new(Arc::new(mock_repo), Arc::new(mock_store));

        assert!(service.persist().await.is_ok());
    }

    #[tokio::test]
    async fn test_persist_surfaces_storage_failure() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_store = MockSnapshotStore::new();

        mock_repo.expect_snapshot().returning(|| Ok(Vec::new()));
        mock_store
            .expect_save()
            .returning(|_| Err(AppError::storage("disk full", json!({}))));
        mock_store
            .expect_describe()
            .returning(|| "mock".to_string());

        let service = SnapshotService::new(Arc::new(mock_repo), Arc::new(mock_store));

        assert!(matches!(
            service.persist().await,
            Err(AppError::StorageUnavailable { .. })
        ));
    }
}
