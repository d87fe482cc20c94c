//! Project Gutenberg source, through the Gutendex JSON API.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::models::{BookFormat, BookResult, BookResultBuilder, SearchQuery, SourceType};
use crate::sources::{fetch_body, Source, SourceError};
use crate::utils::HttpClient;

const GUTENDEX_API_BASE: &str = "https://gutendex.com";

/// Project Gutenberg source
///
/// Gutendex lists every file of a book in a `formats` map keyed by MIME type;
/// keys mentioning `pdf` or `epub` become results.
#[derive(Debug, Clone)]
pub struct GutendexSource {
    client: HttpClient,
    base_url: String,
}

impl GutendexSource {
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GUTENDEX_API_BASE)
    }

    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self, query: &SearchQuery) -> String {
        let search = format!("{} {}", query.title, query.author);
        format!(
            "{}/books?search={}",
            self.base_url,
            urlencoding::encode(&search)
        )
    }

    /// Map a `/books` body to results
    pub fn parse_response(body: &str) -> Result<Vec<BookResult>, SourceError> {
        let data: GutendexResponse = serde_json::from_str(body)?;

        let mut results = Vec::new();
        for book in &data.results {
            let authors = book.authors.iter().filter_map(|a| a.name.as_deref());

            // Payload order, so the first listed file wins a duplicate URL
            for (mime, url) in &book.formats {
                let Some(format) = BookFormat::from_mime_hint(mime) else {
                    continue;
                };

                results.push(
                    BookResultBuilder::new(url.as_str(), format, SourceType::Gutenberg)
                        .title(book.title.as_deref())
                        .authors(authors.clone())
                        .build(),
                );
            }
        }

        Ok(results)
    }
}

#[async_trait]
impl Source for GutendexSource {
    fn id(&self) -> &str {
        "gutenberg"
    }

    fn name(&self) -> &str {
        "Project Gutenberg"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<BookResult>, SourceError> {
        let body = fetch_body(&self.client, &self.search_url(query), self.name()).await?;
        Self::parse_response(&body)
    }
}

// ===== Gutendex API Types =====

#[derive(Debug, Deserialize)]
struct GutendexResponse {
    #[serde(default)]
    results: Vec<GutendexBook>,
}

#[derive(Debug, Deserialize)]
struct GutendexBook {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<GutendexPerson>,
    #[serde(default)]
    formats: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct GutendexPerson {
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "count": 1,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 1342,
                "title": "Pride and Prejudice",
                "authors": [{"name": "Austen, Jane", "birth_year": 1775, "death_year": 1817}],
                "formats": {
                    "text/html": "https://www.gutenberg.org/ebooks/1342.html.images",
                    "application/epub+zip": "https://www.gutenberg.org/ebooks/1342.epub3.images",
                    "application/x-mobipocket-ebook": "https://www.gutenberg.org/ebooks/1342.kf8.images",
                    "text/plain; charset=us-ascii": "https://www.gutenberg.org/ebooks/1342.txt.utf-8",
                    "image/jpeg": "https://www.gutenberg.org/cache/epub/1342/pg1342.cover.medium.jpg"
                }
            },
            {
                "id": 99,
                "authors": [],
                "formats": {"application/pdf": "https://example.org/99.pdf"}
            }
        ]
    }"#;

    #[test]
    fn test_parse_mime_keys() {
        let results = GutendexSource::parse_response(FIXTURE).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].format(), BookFormat::Epub);
        assert_eq!(results[0].author(), "Austen, Jane");
        assert_eq!(results[0].source().name(), "Project Gutenberg");
        assert_eq!(
            results[0].download_url(),
            "https://www.gutenberg.org/ebooks/1342.epub3.images"
        );

        assert_eq!(results[1].format(), BookFormat::Pdf);
        assert_eq!(results[1].title(), "Unknown");
        assert_eq!(results[1].author(), "Unknown");
    }

    #[test]
    fn test_parse_keeps_payload_order() {
        let body = r#"{"results": [{
            "title": "Twice",
            "formats": {
                "application/pdf": "https://x/t.pdf",
                "text/html": "https://x/t.html",
                "application/epub+zip": "https://x/t.epub"
            }
        }]}"#;
        let urls: Vec<String> = GutendexSource::parse_response(body)
            .unwrap()
            .iter()
            .map(|b| b.download_url().to_string())
            .collect();
        assert_eq!(urls, vec!["https://x/t.pdf", "https://x/t.epub"]);
    }

    #[test]
    fn test_parse_joins_all_authors() {
        let body = r#"{"results": [{
            "title": "Collab",
            "authors": [{"name": "A"}, {"name": null}, {"name": "B"}],
            "formats": {"application/epub+zip": "https://example.org/c.epub"}
        }]}"#;
        let results = GutendexSource::parse_response(body).unwrap();
        assert_eq!(results[0].author(), "A, B");
    }

    #[test]
    fn test_parse_without_ebook_formats() {
        let body = r#"{"results": [{"title": "Audio", "formats": {"audio/mpeg": "https://x/a.mp3"}}]}"#;
        assert!(GutendexSource::parse_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(GutendexSource::parse_response("").is_err());
        assert!(GutendexSource::parse_response(r#"{"results": "nope"}"#).is_err());
    }

    #[test]
    fn test_search_url() {
        let client = HttpClient::new().unwrap();
        let source = GutendexSource::with_base_url(client, "http://127.0.0.1:9000");
        assert_eq!(
            source.search_url(&SearchQuery::new("Emma", "Austen")),
            "http://127.0.0.1:9000/books?search=Emma%20Austen"
        );
    }
}
