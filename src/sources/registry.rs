//! Registry for managing catalog sources.

use std::sync::Arc;

use super::{GoogleBooksSource, GutendexSource, OpenLibrarySource, Source};
use crate::config::SourcesConfig;
use crate::utils::HttpClient;

/// Ids of every built-in source, in query order
pub const BUILTIN_SOURCE_IDS: [&str; 3] = ["openlibrary", "gutenberg", "google_books"];

/// Ordered registry of catalog sources
///
/// Unlike a keyed map, registration order is kept: sources are queried and
/// their results concatenated in that order, which decides which duplicate
/// survives aggregation.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in sources enabled by `config`
    pub fn from_config(client: &HttpClient, config: &SourcesConfig) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(OpenLibrarySource::new(client.clone())));
        registry.register(Arc::new(GutendexSource::new(client.clone())));
        registry.register(Arc::new(GoogleBooksSource::new(
            client.clone(),
            config.google_books_max_results,
        )));

        if let Some(enabled) = &config.enabled {
            registry.retain_ids(enabled);
        }

        registry
    }

    /// Register a new source; a source with the same id is replaced in place
    pub fn register(&mut self, source: Arc<dyn Source>) {
        match self.sources.iter().position(|s| s.id() == source.id()) {
            Some(idx) => self.sources[idx] = source,
            None => self.sources.push(source),
        }
    }

    /// Keep only the sources whose id is listed (case-insensitive), preserving order
    pub fn retain_ids<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.sources
            .retain(|s| ids.iter().any(|id| id.as_ref().trim().eq_ignore_ascii_case(s.id())));
    }

    /// Get a source by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Source>> {
        self.sources.iter().find(|s| s.id() == id)
    }

    /// Get all registered sources in query order
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.iter()
    }

    /// Get all source IDs in query order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.id())
    }

    /// Check if a source exists
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
