//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access so the allocation and resolution logic
//! can run against any backend. Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - The live code → record mapping
//! - [`SnapshotStore`] - Whole-mapping durability (load at startup, save after mutations)

pub mod snapshot_store;
pub mod url_repository;

pub use snapshot_store::SnapshotStore;
pub use url_repository::{InsertOutcome, UrlRepository};

#[cfg(test)]
pub use snapshot_store::MockSnapshotStore;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
