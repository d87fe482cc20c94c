//! OpenLibrary catalog source.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{BookFormat, BookResult, BookResultBuilder, SearchQuery, SourceType};
use crate::sources::{fetch_body, Source, SourceError};
use crate::utils::HttpClient;

const OPENLIBRARY_API_BASE: &str = "https://openlibrary.org";

/// OpenLibrary catalog source
///
/// Uses the `search.json` endpoint with a fielded `q` query and emits one
/// result per `formats[]` entry that names a `.pdf` or `.epub` file.
#[derive(Debug, Clone)]
pub struct OpenLibrarySource {
    client: HttpClient,
    base_url: String,
}

impl OpenLibrarySource {
    /// Create a new OpenLibrary source
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, OPENLIBRARY_API_BASE)
    }

    /// Create a source against another host (mirrors, test servers)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build request URL
    pub fn search_url(&self, query: &SearchQuery) -> String {
        let q = format!("title:{} author:{}", query.title, query.author);
        format!(
            "{}/search.json?q={}&fields=title,author_name,formats",
            self.base_url,
            urlencoding::encode(&q)
        )
    }

    /// Map a `search.json` body to results
    pub fn parse_response(body: &str) -> Result<Vec<BookResult>, SourceError> {
        let data: OLSearchResponse = serde_json::from_str(body)?;

        let mut results = Vec::new();
        for doc in &data.docs {
            for entry in &doc.formats {
                let Some(format) = BookFormat::from_extension_hint(entry) else {
                    continue;
                };

                results.push(
                    BookResultBuilder::new(entry.as_str(), format, SourceType::OpenLibrary)
                        .title(doc.title.as_deref())
                        .authors(&doc.author_name)
                        .build(),
                );
            }
        }

        Ok(results)
    }
}

#[async_trait]
impl Source for OpenLibrarySource {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "OpenLibrary"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<BookResult>, SourceError> {
        let body = fetch_body(&self.client, &self.search_url(query), self.name()).await?;
        Self::parse_response(&body)
    }
}

// ===== OpenLibrary API Types =====

#[derive(Debug, Deserialize)]
struct OLSearchResponse {
    #[serde(default)]
    docs: Vec<OLDoc>,
}

#[derive(Debug, Deserialize)]
struct OLDoc {
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    #[serde(default)]
    formats: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "numFound": 2,
        "docs": [
            {
                "title": "Pride and Prejudice",
                "author_name": ["Jane Austen"],
                "formats": [
                    "https://archive.org/download/pp/pride.pdf",
                    "https://archive.org/download/pp/pride.txt",
                    "https://archive.org/download/pp/pride.EPUB"
                ]
            },
            {
                "formats": ["https://archive.org/download/anon/book.epub"]
            },
            {
                "title": "No files",
                "author_name": ["Someone"]
            }
        ]
    }"#;

    #[test]
    fn test_parse_keeps_pdf_and_epub_only() {
        let results = OpenLibrarySource::parse_response(FIXTURE).unwrap();
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].format(), BookFormat::Pdf);
        assert_eq!(results[0].title(), "Pride and Prejudice");
        assert_eq!(results[0].author(), "Jane Austen");
        assert_eq!(results[0].source().name(), "OpenLibrary");
        assert_eq!(results[0].download_url(), "https://archive.org/download/pp/pride.pdf");

        assert_eq!(results[1].format(), BookFormat::Epub);
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let results = OpenLibrarySource::parse_response(FIXTURE).unwrap();
        assert_eq!(results[2].title(), "Unknown");
        assert_eq!(results[2].author(), "Unknown");
    }

    #[test]
    fn test_parse_no_matching_formats() {
        let body = r#"{"docs": [{"title": "Plain", "formats": ["a.txt", "b.html"]}]}"#;
        assert!(OpenLibrarySource::parse_response(body).unwrap().is_empty());

        let body = r#"{"numFound": 0}"#;
        assert!(OpenLibrarySource::parse_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(
            OpenLibrarySource::parse_response("<html>busy</html>"),
            Err(SourceError::Parse(_))
        ));
        assert!(OpenLibrarySource::parse_response(r#"{"docs": {"title": "x"}}"#).is_err());
    }

    #[test]
    fn test_search_url() {
        let client = HttpClient::new().unwrap();
        let source = OpenLibrarySource::with_base_url(client, "http://localhost:1234/");
        let url = source.search_url(&SearchQuery::new("Emma", "Jane Austen"));
        assert_eq!(
            url,
            "http://localhost:1234/search.json?q=title%3AEmma%20author%3AJane%20Austen&fields=title,author_name,formats"
        );
    }
}
