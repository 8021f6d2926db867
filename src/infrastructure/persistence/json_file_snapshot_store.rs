//! JSON file [`SnapshotStore`].
//!
//! The file holds one object keyed by short code:
//!
//! ```json
//! {
//!   "abc123": {
//!     "shortCode": "abc123",
//!     "longUrl": "https://example.com",
//!     "createdAt": "2025-01-01T00:00:00Z",
//!     "clickCount": 3,
//!     "lastAccessed": "2025-01-02T10:00:00Z"
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::SnapshotStore;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    short_code: String,
    long_url: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    click_count: u64,
    #[serde(default)]
    last_accessed: Option<DateTime<Utc>>,
}

impl From<&UrlRecord> for StoredRecord {
    fn from(record: &UrlRecord) -> Self {
        Self {
            short_code: record.code.clone(),
            long_url: record.target.clone(),
            created_at: record.created_at,
            click_count: record.click_count,
            last_accessed: record.last_accessed_at,
        }
    }
}

impl From<StoredRecord> for UrlRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            code: stored.short_code,
            target: stored.long_url,
            created_at: stored.created_at,
            click_count: stored.click_count,
            last_accessed_at: stored.last_accessed,
        }
    }
}

/// Persists the mapping as a pretty-printed JSON file.
///
/// Writes go to a sibling `*.tmp` file which is then renamed over the target,
/// so a crash mid-write leaves the previous snapshot intact.
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "data.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn load(&self) -> Result<Vec<UrlRecord>, AppError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Data file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to read data file");
                return Err(e.into());
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let stored: BTreeMap<String, StoredRecord> =
            serde_json::from_str(&content).map_err(|e| {
                error!(path = %self.path.display(), error = %e, "Failed to parse data file");
                AppError::from(e)
            })?;

        let mut records = Vec::with_capacity(stored.len());
        for (key, record) in stored {
            if key != record.short_code {
                return Err(AppError::storage(
                    "Snapshot key does not match its record",
                    json!({ "key": key, "shortCode": record.short_code }),
                ));
            }
            records.push(UrlRecord::from(record));
        }

        debug!(path = %self.path.display(), count = records.len(), "Loaded snapshot");
        Ok(records)
    }

    async fn save(&self, records: &[UrlRecord]) -> Result<(), AppError> {
        let stored: BTreeMap<&str, StoredRecord> = records
            .iter()
            .map(|r| (r.code.as_str(), StoredRecord::from(r)))
            .collect();

        let body = serde_json::to_string_pretty(&stored)?;
        let tmp = self.temp_path();

        let result = async {
            tokio::fs::write(&tmp, body).await?;
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = result {
            error!(path = %self.path.display(), error = %e, "Failed to write data file");
            return Err(e.into());
        }

        debug!(path = %self.path.display(), count = records.len(), "Saved snapshot");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn sample() -> Vec<UrlRecord> {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut clicked = UrlRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            created,
        );
        clicked.record_click(Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap());

        vec![
            clicked,
            UrlRecord::new(
                "XyZ789".to_string(),
                "http://other.org/path".to_string(),
                created,
            ),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("data.json"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("data.json"));

        store.save(&sample()).await.unwrap();

        let mut loaded = store.load().await.unwrap();
        loaded.sort_by(|a, b| a.code.cmp(&b.code));
        let mut expected = sample();
        expected.sort_by(|a, b| a.code.cmp(&b.code));

        assert_eq!(loaded, expected);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_file_uses_code_keyed_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = JsonFileSnapshotStore::new(&path);

        store.save(&sample()).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["abc123"]["longUrl"], "https://example.com");
        assert_eq!(raw["abc123"]["clickCount"], 1);
        assert!(raw["XyZ789"]["lastAccessed"].is_null());
    }

    #[tokio::test]
    async fn test_loads_records_with_extra_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{
                "k1k1k1": {
                    "id": "5f0c7b1e-0000-0000-0000-000000000000",
                    "longUrl": "https://example.com/path",
                    "shortCode": "k1k1k1",
                    "createdAt": "2024-05-01T12:00:00.000Z",
                    "clickCount": 7,
                    "lastAccessed": null
                }
            }"#,
        )
        .unwrap();

        let records = JsonFileSnapshotStore::new(&path).load().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "k1k1k1");
        assert_eq!(records[0].click_count, 7);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileSnapshotStore::new(&path).load().await.unwrap_err();

        assert!(matches!(err, AppError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_unwritable_location_is_storage_error() {
        let dir = tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("missing").join("data.json"));

        let err = store.save(&sample()).await.unwrap_err();

        assert!(matches!(err, AppError::StorageUnavailable { .. }));
    }
}
