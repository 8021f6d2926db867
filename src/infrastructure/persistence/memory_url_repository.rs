//! In-process [`UrlRepository`] implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{InsertOutcome, UrlRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    by_code: HashMap<String, UrlRecord>,
    /// target → code; kept in lockstep with `by_code`.
    by_target: HashMap<String, String>,
}

impl Tables {
    fn from_records(records: Vec<UrlRecord>) -> Result<Self, AppError> {
        let mut tables = Tables::default();
        for record in records {
            if tables.by_code.contains_key(&record.code) {
                return Err(AppError::internal(
                    "Duplicate short code in snapshot",
                    json!({ "code": record.code }),
                ));
            }
            if let Some(code) = tables.by_target.get(&record.target) {
                return Err(AppError::internal(
                    "Duplicate target in snapshot",
                    json!({ "target": record.target, "codes": [code, record.code] }),
                ));
            }
            tables
                .by_target
                .insert(record.target.clone(), record.code.clone());
            tables.by_code.insert(record.code.clone(), record);
        }
        Ok(tables)
    }
}

/// Holds the mapping in memory, indexed by code and by target.
///
/// One [`RwLock`] guards both indexes, so inserts, deletes and click updates
/// are each a single critical section and the two maps never disagree.
/// Duplicate-target lookups are O(1).
#[derive(Default)]
pub struct MemoryUrlRepository {
    tables: RwLock<Tables>,
}

impl MemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn get(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.tables.read().await.by_code.get(code).cloned())
    }

    async fn find_by_target(&self, target: &str) -> Result<Option<UrlRecord>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_target
            .get(target)
            .and_then(|code| tables.by_code.get(code))
            .cloned())
    }

    async fn insert(&self, record: UrlRecord) -> Result<InsertOutcome, AppError> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables
            .by_target
            .get(&record.target)
            .and_then(|code| tables.by_code.get(code))
        {
            return Ok(InsertOutcome::TargetExists(existing.clone()));
        }

        if tables.by_code.contains_key(&record.code) {
            return Ok(InsertOutcome::CodeTaken);
        }

        tables
            .by_target
            .insert(record.target.clone(), record.code.clone());
        tables.by_code.insert(record.code.clone(), record);

        Ok(InsertOutcome::Inserted)
    }

    async fn record_click(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<UrlRecord>, AppError> {
        let mut tables = self.tables.write().await;

        Ok(tables.by_code.get_mut(code).map(|record| {
            record.record_click(at);
            record.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let mut tables = self.tables.write().await;

        let removed = tables.by_code.remove(code);
        if let Some(ref record) = removed {
            tables.by_target.remove(&record.target);
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.tables.read().await.by_code.len())
    }

    async fn snapshot(&self) -> Result<Vec<UrlRecord>, AppError> {
        Ok(self.tables.read().await.by_code.values().cloned().collect())
    }

    async fn replace_all(&self, records: Vec<UrlRecord>) -> Result<(), AppError> {
        let fresh = Tables::from_records(records)?;
        *self.tables.write().await = fresh;
        Ok(())
    }
}
