//! Search, aggregate, select and download, one step after another.
//!
//! Sources are awaited sequentially in registry order. Each source yields a
//! typed [`SourceOutcome`]; only [`search_all`] turns failures into an empty
//! contribution plus a logged and reported reason.

use tracing::{debug, info, warn};

use crate::models::{BookResult, SearchQuery};
use crate::sources::{Source, SourceError, SourceRegistry};
use crate::ui::{select_result, Reporter, Status};
use crate::utils::{deduplicate_results, Downloader};

/// What one source returned for a query
#[derive(Debug)]
pub struct SourceOutcome {
    pub source_id: String,
    pub source_name: String,
    pub result: Result<Vec<BookResult>, SourceError>,
}

impl SourceOutcome {
    /// Results on success, nothing on failure
    pub fn into_results(self) -> Vec<BookResult> {
        self.result.unwrap_or_default()
    }
}

/// How an interactive run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No source produced a PDF/EPUB hit
    NoResults,
    /// The user quit at the selection prompt
    Cancelled,
    /// The selected book was saved
    Downloaded(BookResult),
    /// The selected book could not be saved
    DownloadFailed(BookResult),
}

/// Query one source, keeping the typed result
pub async fn search_source(source: &dyn Source, query: &SearchQuery) -> SourceOutcome {
    debug!(source = source.id(), title = %query.title, author = %query.author, "Searching");

    SourceOutcome {
        source_id: source.id().to_string(),
        source_name: source.name().to_string(),
        result: source.search(query).await,
    }
}

/// Search every source and return the deduplicated results.
///
/// A failing source is logged, reported and contributes nothing; it never
/// aborts the search.
pub async fn search_all(
    registry: &SourceRegistry,
    query: &SearchQuery,
    reporter: &mut dyn Reporter,
) -> Vec<BookResult> {
    reporter.notice(
        Status::Search,
        &format!("Searching for \"{}\" by {}...", query.title, query.author),
    );

    let names: Vec<&str> = registry.all().map(|s| s.name()).collect();
    reporter.search_started(&names);

    let mut per_source = Vec::with_capacity(registry.len());
    for source in registry.all() {
        let outcome = search_source(&**source, query).await;

        if let Err(e) = &outcome.result {
            warn!(source = %outcome.source_id, error = %e, "Source search failed");
            reporter.notice(
                Status::Error,
                &format!("Error searching {}: {}", outcome.source_name, e),
            );
        }

        let results = outcome.into_results();
        reporter.source_finished(source.name(), results.len());
        per_source.push(results);
    }

    let found: usize = per_source.iter().map(Vec::len).sum();
    let unique = deduplicate_results(per_source);
    info!(found, unique = unique.len(), "Search complete");

    reporter.search_finished(unique.len());
    unique
}

/// Run the whole interactive flow for one query
pub async fn run(
    registry: &SourceRegistry,
    downloader: &Downloader,
    query: &SearchQuery,
    reporter: &mut dyn Reporter,
) -> RunOutcome {
    let results = search_all(registry, query, reporter).await;
    if results.is_empty() {
        // The selector reports the empty listing
        select_result(&results, reporter);
        return RunOutcome::NoResults;
    }

    let Some(book) = select_result(&results, reporter) else {
        return RunOutcome::Cancelled;
    };

    if downloader.download(&book, reporter).await {
        RunOutcome::Downloaded(book)
    } else {
        RunOutcome::DownloadFailed(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::make_book;
    use crate::sources::MockSource;
    use crate::ui::RecordingReporter;
    use crate::utils::HttpClient;
    use std::sync::Arc;

    fn query() -> SearchQuery {
        SearchQuery::new("Emma", "Jane Austen")
    }

    #[tokio::test]
    async fn test_failing_source_is_skipped() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(MockSource::new("down", "Down").failing("connection refused")));
        registry.register(Arc::new(
            MockSource::new("up", "Up").with_results(vec![make_book("Emma", "https://x/e.pdf", "Up")]),
        ));

        let mut reporter = RecordingReporter::new();
        let results = search_all(&registry, &query(), &mut reporter).await;

        assert_eq!(results.len(), 1);
        assert_eq!(
            reporter.source_counts,
            vec![("Down".to_string(), 0), ("Up".to_string(), 1)]
        );
        let errors = reporter.notices_with(Status::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Error searching Down"));
        assert!(errors[0].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_search_source_keeps_reason() {
        let down = MockSource::new("down", "Down").failing("timeout");
        let outcome = search_source(&down, &query()).await;

        assert_eq!(outcome.source_id, "down");
        assert!(matches!(&outcome.result, Err(SourceError::Network(m)) if m == "timeout"));
        assert!(outcome.into_results().is_empty());
    }

    #[tokio::test]
    async fn test_sources_queried_once_in_order() {
        let first = Arc::new(MockSource::new("a", "A").with_results(vec![
            make_book("Emma", "https://x/shared.pdf", "A"),
        ]));
        let second = Arc::new(MockSource::new("b", "B").with_results(vec![
            make_book("Emma copy", "https://x/shared.pdf", "B"),
            make_book("Sanditon", "https://x/s.epub", "B"),
        ]));

        let mut registry = SourceRegistry::new();
        registry.register(first.clone());
        registry.register(second.clone());

        let mut reporter = RecordingReporter::new();
        let results = search_all(&registry, &query(), &mut reporter).await;

        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title(), "Emma");
        assert_eq!(reporter.search_totals, vec![2]);
        assert_eq!(
            reporter.notices_with(Status::Search),
            vec!["Searching for \"Emma\" by Jane Austen..."]
        );
    }

    #[tokio::test]
    async fn test_run_without_results() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(MockSource::new("empty", "Empty")));
        let downloader = Downloader::new(HttpClient::new().unwrap(), std::env::temp_dir());

        let mut reporter = RecordingReporter::with_inputs(["1"]);
        let outcome = run(&registry, &downloader, &query(), &mut reporter).await;

        assert_eq!(outcome, RunOutcome::NoResults);
        assert!(reporter.prompts.is_empty());
        assert_eq!(reporter.notices_with(Status::Warning), vec!["No results found."]);
    }

    #[tokio::test]
    async fn test_run_cancelled() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(
            MockSource::new("one", "One").with_results(vec![make_book("Emma", "https://x/e.pdf", "One")]),
        ));
        let downloader = Downloader::new(HttpClient::new().unwrap(), std::env::temp_dir());

        let mut reporter = RecordingReporter::with_inputs(["q"]);
        let outcome = run(&registry, &downloader, &query(), &mut reporter).await;

        assert_eq!(outcome, RunOutcome::Cancelled);
        assert!(reporter.progress.is_empty());
    }
}
