//! # Book Fetcher
//!
//! Search public book catalogs for freely downloadable PDF and EPUB editions,
//! merge the hits into one list, let the user pick one, and stream it to disk.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (BookResult, BookFormat, SearchQuery)
//! - [`sources`]: Catalog clients behind the [`Source`] trait
//! - [`pipeline`]: Sequential search orchestration and result aggregation
//! - [`ui`]: The [`ui::Reporter`] capability, terminal rendering and selection
//! - [`utils`]: HTTP client, deduplication, filename sanitization, downloads
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{BookFormat, BookResult};
pub use sources::{Source, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
