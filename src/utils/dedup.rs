//! Deduplication of book results across sources.

use std::collections::HashSet;

use crate::models::BookResult;

/// Flatten per-source result lists and drop repeated download URLs.
///
/// Sources are concatenated in the order given and each source's own order is
/// kept. When two results share a `download_url`, the first one encountered
/// wins.
pub fn deduplicate_results<I>(per_source: I) -> Vec<BookResult>
where
    I: IntoIterator<Item = Vec<BookResult>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();

    for result in per_source.into_iter().flatten() {
        if seen.insert(result.download_url().to_string()) {
            unique.push(result);
        }
    }

    unique
}
