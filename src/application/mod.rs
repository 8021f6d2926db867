//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Allocation, resolution, stats, listing and deletion
//! - [`services::snapshot_service::SnapshotService`] - Restore at startup, persist after mutations

pub mod services;
