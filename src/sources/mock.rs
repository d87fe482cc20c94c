//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::models::{BookFormat, BookResult, BookResultBuilder, SearchQuery, SourceType};
use crate::sources::{Source, SourceError};

/// A mock source that returns predefined results or a predefined failure.
#[derive(Debug)]
pub struct MockSource {
    id: String,
    name: String,
    results: Vec<BookResult>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a mock source that finds nothing.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            results: Vec::new(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Return these results from every search.
    pub fn with_results(mut self, results: Vec<BookResult>) -> Self {
        self.results = results;
        self
    }

    /// Fail every search with a network error carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of searches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, _query: &SearchQuery) -> Result<Vec<BookResult>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(SourceError::Network(message.clone())),
            None => Ok(self.results.clone()),
        }
    }
}

/// Helper function to create a book result for testing.
pub fn make_book(title: &str, download_url: &str, source: &str) -> BookResult {
    let format = BookFormat::from_extension_hint(download_url).unwrap_or(BookFormat::Pdf);
    BookResultBuilder::new(download_url, format, SourceType::Other(source.to_string()))
        .title(Some(title))
        .authors(["Test Author"])
        .build()
}
