//! Book catalog clients with a trait-based architecture.
//!
//! This module defines the [`Source`] trait that every catalog implements.
//! A source issues exactly one GET per search and maps the JSON body into
//! [`BookResult`]s through a pure `parse_response` function, so the
//! mapping can be tested against recorded payloads without any network.
//!
//! # Available Sources
//!
//! | id             | catalog                         |
//! |----------------|---------------------------------|
//! | `openlibrary`  | OpenLibrary search API          |
//! | `gutenberg`    | Project Gutenberg via Gutendex  |
//! | `google_books` | Google Books volumes API        |
//!
//! Sources are queried in registry order; see [`SourceRegistry`].
//!
//! # Runtime Source Configuration
//!
//! Restrict the catalogs in use with the `sources.enabled` configuration key,
//! the `BOOK_FETCHER_SOURCES__ENABLED` environment variable or the repeatable
//! `--source` flag.

mod google_books;
mod gutendex;
mod openlibrary;
mod registry;

pub mod mock;

pub use google_books::{GoogleBooksSource, DEFAULT_MAX_RESULTS};
pub use gutendex::GutendexSource;
pub use mock::MockSource;
pub use openlibrary::OpenLibrarySource;
pub use registry::{SourceRegistry, BUILTIN_SOURCE_IDS};

use crate::models::{BookResult, SearchQuery};
use crate::utils::HttpClient;
use async_trait::async_trait;
use tracing::debug;

/// The Source trait defines the interface for all catalog clients.
///
/// # Implementing a New Source
///
/// 1. Create a struct holding an [`HttpClient`] and a base URL
/// 2. Keep the JSON mapping in a pure `parse_response(body)` function
/// 3. Implement `search` as one `fetch_body` call followed by the mapping
/// 4. Only emit PDF/EPUB entries and default missing titles/authors
/// 5. Add the source to `SourceRegistry::from_config()` or register it dynamically
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "openlibrary", "gutenberg")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search the catalog with one GET request, returning PDF/EPUB hits only
    async fn search(&self, query: &SearchQuery) -> Result<Vec<BookResult>, SourceError>;
}

/// GET a URL and return the body text, treating non-2xx statuses as errors
pub(crate) async fn fetch_body(
    client: &HttpClient,
    url: &str,
    source_name: &str,
) -> Result<String, SourceError> {
    debug!(source = source_name, url = %url, "Querying catalog");

    let response = client
        .search_get(url)
        .send()
        .await
        .map_err(|e| SourceError::Network(format!("Failed to search {}: {}", source_name, e)))?;

    if !response.status().is_success() {
        return Err(SourceError::Api(format!(
            "{} API returned status: {}",
            source_name,
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| SourceError::Network(format!("Failed to read {} response: {}", source_name, e)))
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (JSON decode or unexpected shape)
    #[error("Parse error: {0}")]
    Parse(String),

    /// API error from the source (non-success status)
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
