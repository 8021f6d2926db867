//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, snapshot restore, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::SnapshotStore;
use crate::infrastructure::persistence::{
    JsonFileSnapshotStore, MemoryUrlRepository, NullSnapshotStore,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Picks the snapshot store for the configured data file.
pub fn snapshot_store(config: &Config) -> Arc<dyn SnapshotStore> {
    match config.data_file {
        Some(ref path) => Arc::new(JsonFileSnapshotStore::new(path.clone())),
        None => Arc::new(NullSnapshotStore::new()),
    }
}

/// Builds the application state and restores the last snapshot into it.
///
/// # Errors
///
/// Returns an error if the snapshot exists but cannot be read or decoded.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let state = AppState::new(
        Arc::new(MemoryUrlRepository::new()),
        Arc::new(RandomCodeGenerator::new()),
        snapshot_store(config),
        config.base_url.clone(),
        config.collision_warn_threshold,
    );

    state
        .snapshot_service
        .restore()
        .await
        .context("Failed to restore short links from data file")?;

    Ok(state)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory repository restored from the data file
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The data file is unreadable or corrupt
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
