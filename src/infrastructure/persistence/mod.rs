//! Repository and snapshot store implementations.
//!
//! # Implementations
//!
//! - [`MemoryUrlRepository`] - Live mapping held in process memory
//! - [`JsonFileSnapshotStore`] - Whole-mapping snapshots in a JSON file
//! - [`NullSnapshotStore`] - No durability (memory-only mode and tests)

pub mod json_file_snapshot_store;
pub mod memory_url_repository;
pub mod null_snapshot_store;

pub use json_file_snapshot_store::JsonFileSnapshotStore;
pub use memory_url_repository::MemoryUrlRepository;
pub use null_snapshot_store::NullSnapshotStore;
