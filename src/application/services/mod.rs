//! Business logic services for the application layer.

pub mod link_service;
pub mod snapshot_service;

pub use link_service::{Allocation, LinkService};
pub use snapshot_service::SnapshotService;
