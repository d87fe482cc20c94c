//! Utility modules supporting search and download.
//!
//! - [`deduplicate_results`]: Merge per-source results, first download URL wins
//! - [`HttpClient`]: Shared HTTP client with search and download request builders
//! - [`Downloader`]: Stream a selected book into the output directory
//! - [`book_filename`] / [`sanitize_title`]: Derive safe file names from titles
//!
//! # Deduplication
//!
//! ```rust
//! use book_fetcher::utils::deduplicate_results;
//! use book_fetcher::BookResult;
//!
//! # fn example(openlibrary: Vec<BookResult>, gutenberg: Vec<BookResult>) {
//! let unique = deduplicate_results(vec![openlibrary, gutenberg]);
//! # }
//! ```

mod dedup;
mod download;
mod filename;
mod http;

pub use dedup::deduplicate_results;
pub use download::{DownloadError, DownloadOutcome, Downloader, DEFAULT_CHUNK_SIZE};
pub use filename::{book_filename, sanitize_title};
pub use http::HttpClient;
