#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tinylink::AppError;
use tinylink::api::handlers::redirect_handler;
use tinylink::api::routes::api_routes;
use tinylink::domain::entities::UrlRecord;
use tinylink::domain::repositories::{SnapshotStore, UrlRepository};
use tinylink::infrastructure::persistence::{MemoryUrlRepository, NullSnapshotStore};
use tinylink::state::AppState;
use tinylink::utils::code_generator::RandomCodeGenerator;

pub const BASE_URL: &str = "http://s.test";

pub fn create_test_state() -> (AppState, Arc<MemoryUrlRepository>) {
    create_test_state_with(Arc::new(NullSnapshotStore::new()), Some(BASE_URL.to_string()))
}

pub fn create_test_state_with(
    store: Arc<dyn SnapshotStore>,
    base_url: Option<String>,
) -> (AppState, Arc<MemoryUrlRepository>) {
    let repo = Arc::new(MemoryUrlRepository::new());
    let state = AppState::new(
        repo.clone(),
        Arc::new(RandomCodeGenerator::with_seed(7)),
        store,
        base_url,
        16,
    );
    (state, repo)
}

/// Snapshot store that keeps every saved mapping and can be switched to fail.
#[derive(Default)]
pub struct RecordingStore {
    saves: Mutex<Vec<Vec<UrlRecord>>>,
    failing: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    /// The mapping as of the last successful save.
    pub fn last_saved(&self) -> Option<Vec<UrlRecord>> {
        self.saves.lock().unwrap().last().cloned()
    }

    pub fn last_saved_record(&self, code: &str) -> Option<UrlRecord> {
        self.last_saved()?.into_iter().find(|r| r.code == code)
    }
}

#[async_trait]
impl SnapshotStore for RecordingStore {
    async fn load(&self) -> Result<Vec<UrlRecord>, AppError> {
        Ok(self.last_saved().unwrap_or_default())
    }

    async fn save(&self, records: &[UrlRecord]) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::storage("Disk full", json!({})));
        }
        self.saves.lock().unwrap().push(records.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

pub fn create_recording_state() -> (AppState, Arc<MemoryUrlRepository>, Arc<RecordingStore>) {
    let store = RecordingStore::new();
    let (state, repo) = create_test_state_with(store.clone(), Some(BASE_URL.to_string()));
    (state, repo, store)
}

pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_routes())
        .with_state(state)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_router(state)).unwrap()
}

pub async fn create_test_link(repo: &MemoryUrlRepository, code: &str, url: &str) {
    insert(repo, UrlRecord::new(code.to_string(), url.to_string(), Utc::now())).await;
}

pub async fn create_test_link_at(
    repo: &MemoryUrlRepository,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
) {
    insert(repo, UrlRecord::new(code.to_string(), url.to_string(), created_at)).await;
}

async fn insert(repo: &MemoryUrlRepository, record: UrlRecord) {
    let outcome = repo.insert(record).await.unwrap();
    assert_eq!(
        outcome,
        tinylink::domain::repositories::InsertOutcome::Inserted
    );
}
