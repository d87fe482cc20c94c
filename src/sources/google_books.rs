//! Google Books source.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{BookFormat, BookResult, BookResultBuilder, SearchQuery, SourceType};
use crate::sources::{fetch_body, Source, SourceError};
use crate::utils::HttpClient;

const GOOGLE_BOOKS_API_BASE: &str = "https://www.googleapis.com";

/// Default `maxResults` sent to the volumes endpoint
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Google Books source
///
/// Volumes carry `accessInfo.pdf` / `accessInfo.epub` availability blocks.
/// Only blocks that are available and expose a `downloadLink` become results;
/// volumes that can only be read in the web reader are dropped.
#[derive(Debug, Clone)]
pub struct GoogleBooksSource {
    client: HttpClient,
    base_url: String,
    max_results: usize,
}

impl GoogleBooksSource {
    pub fn new(client: HttpClient, max_results: usize) -> Self {
        Self::with_base_url(client, GOOGLE_BOOKS_API_BASE, max_results)
    }

    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>, max_results: usize) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_results: max_results.max(1),
        }
    }

    pub fn search_url(&self, query: &SearchQuery) -> String {
        let q = format!("intitle:{}+inauthor:{}", query.title, query.author);
        format!(
            "{}/books/v1/volumes?q={}&maxResults={}",
            self.base_url,
            urlencoding::encode(&q),
            self.max_results
        )
    }

    /// Map a `/books/v1/volumes` body to results
    pub fn parse_response(body: &str) -> Result<Vec<BookResult>, SourceError> {
        let data: VolumesResponse = serde_json::from_str(body)?;

        let mut results = Vec::new();
        for volume in &data.items {
            let info = volume.volume_info.as_ref();
            let Some(access) = volume.access_info.as_ref() else {
                continue;
            };

            let offers = [(BookFormat::Pdf, &access.pdf), (BookFormat::Epub, &access.epub)];
            for (format, offer) in offers {
                let Some(link) = offer
                    .as_ref()
                    .filter(|o| o.is_available)
                    .and_then(|o| o.download_link.as_deref())
                else {
                    continue;
                };

                results.push(
                    BookResultBuilder::new(link, format, SourceType::GoogleBooks)
                        .title(info.and_then(|i| i.title.as_deref()))
                        .authors(info.map(|i| i.authors.as_slice()).unwrap_or_default())
                        .build(),
                );
            }
        }

        Ok(results)
    }
}

#[async_trait]
impl Source for GoogleBooksSource {
    fn id(&self) -> &str {
        "google_books"
    }

    fn name(&self) -> &str {
        "Google Books"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<BookResult>, SourceError> {
        let body = fetch_body(&self.client, &self.search_url(query), self.name()).await?;
        Self::parse_response(&body)
    }
}

// ===== Google Books API Types =====

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: Option<VolumeInfo>,
    access_info: Option<AccessInfo>,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AccessInfo {
    pdf: Option<FormatOffer>,
    epub: Option<FormatOffer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatOffer {
    #[serde(default)]
    is_available: bool,
    download_link: Option<String>,
}
