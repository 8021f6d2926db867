//! Shared state injected into every handler.

use std::sync::Arc;
use std::time::Instant;

use axum::http::{HeaderMap, Uri};

use crate::application::services::{LinkService, SnapshotService};
use crate::domain::repositories::SnapshotStore;
use crate::error::AppError;
use crate::infrastructure::persistence::MemoryUrlRepository;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::extract_domain::base_url_from_request;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<MemoryUrlRepository>>,
    pub snapshot_service: Arc<SnapshotService<MemoryUrlRepository>>,
    /// Public origin for short URLs; `None` derives it from the request host.
    pub base_url: Option<String>,
    pub started_at: Instant,
}

impl AppState {
    /// Wires both services around one shared repository.
    pub fn new(
        url_repository: Arc<MemoryUrlRepository>,
        generator: Arc<dyn CodeGenerator>,
        store: Arc<dyn SnapshotStore>,
        base_url: Option<String>,
        collision_warn_threshold: u64,
    ) -> Self {
        let link_service = LinkService::new(url_repository.clone(), generator)
            .with_collision_warn_threshold(collision_warn_threshold);
        let snapshot_service = SnapshotService::new(url_repository, store);

        Self {
            link_service: Arc::new(link_service),
            snapshot_service: Arc::new(snapshot_service),
            base_url,
            started_at: Instant::now(),
        }
    }

    /// Origin used when building short URLs for this request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when no `BASE_URL` is configured and
    /// the request carries no usable host.
    pub fn public_base_url(&self, headers: &HeaderMap, uri: &Uri) -> Result<String, AppError> {
        match self.base_url {
            Some(ref base_url) => Ok(base_url.clone()),
            None => base_url_from_request(headers, uri),
        }
    }
}
