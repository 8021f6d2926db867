//! # tinylink
//!
//! A small URL shortener: long URLs map to 6-character alphanumeric codes,
//! and visiting a code redirects to its URL while counting the click.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - `UrlRecord` and the storage traits
//! - **Application Layer** ([`application`]) - Allocation, resolution and persistence orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory repository and snapshot stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Guarantees
//!
//! - Shortening the same normalized URL twice returns the same code and keeps
//!   its counter
//! - No two targets share a code
//! - Concurrent redirects never lose a click
//!
//! ## Quick Start
//!
//! ```bash
//! export DATA_FILE=data.json   # optional, empty for memory only
//! cargo run
//!
//! curl -X POST localhost:3000/api/shorten \
//!      -H 'content-type: application/json' \
//!      -d '{"longUrl": "example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Allocation, LinkService, SnapshotService};
    pub use crate::domain::entities::UrlRecord;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
