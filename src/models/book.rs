//! Book result model shared by every catalog.

use serde::{Deserialize, Serialize};

/// Placeholder used when a catalog omits a title or author.
pub const UNKNOWN: &str = "Unknown";

/// The catalog where a book was found
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    OpenLibrary,
    Gutenberg,
    GoogleBooks,
    #[serde(untagged)]
    Other(String),
}

impl SourceType {
    /// Returns the display name of the source
    pub fn name(&self) -> &str {
        match self {
            SourceType::OpenLibrary => "OpenLibrary",
            SourceType::Gutenberg => "Project Gutenberg",
            SourceType::GoogleBooks => "Google Books",
            SourceType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Downloadable file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookFormat {
    Pdf,
    Epub,
}

impl BookFormat {
    /// Detect the format from a file name or URL, matching `.pdf` / `.epub`.
    ///
    /// PDF wins when both appear.
    pub fn from_extension_hint(hint: &str) -> Option<Self> {
        let hint = hint.to_lowercase();
        if hint.contains(".pdf") {
            Some(BookFormat::Pdf)
        } else if hint.contains(".epub") {
            Some(BookFormat::Epub)
        } else {
            None
        }
    }

    /// Detect the format from a MIME type or format name, matching `pdf` / `epub`.
    pub fn from_mime_hint(hint: &str) -> Option<Self> {
        let hint = hint.to_lowercase();
        if hint.contains("pdf") {
            Some(BookFormat::Pdf)
        } else if hint.contains("epub") {
            Some(BookFormat::Epub)
        } else {
            None
        }
    }

    /// Lowercase file extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            BookFormat::Pdf => "pdf",
            BookFormat::Epub => "epub",
        }
    }

    /// Uppercase label used in tables
    pub fn label(&self) -> &'static str {
        match self {
            BookFormat::Pdf => "PDF",
            BookFormat::Epub => "EPUB",
        }
    }
}

impl std::fmt::Display for BookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A normalized search hit from any catalog.
///
/// Results are read-only once built; the pipeline only clones and filters them.
/// `download_url` identifies the artifact and is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResult {
    title: String,
    author: String,
    format: BookFormat,
    source: SourceType,
    download_url: String,
}

impl BookResult {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Comma-separated author names
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn format(&self) -> BookFormat {
        self.format
    }

    pub fn source(&self) -> &SourceType {
        &self.source
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }
}

/// Builder for constructing BookResult objects
#[derive(Debug, Clone)]
pub struct BookResultBuilder {
    result: BookResult,
}

impl BookResultBuilder {
    /// Create a new builder with required fields; title and author start as "Unknown"
    pub fn new(download_url: impl Into<String>, format: BookFormat, source: SourceType) -> Self {
        Self {
            result: BookResult {
                title: UNKNOWN.to_string(),
                author: UNKNOWN.to_string(),
                format,
                source,
                download_url: download_url.into(),
            },
        }
    }

    /// Set the title, keeping the placeholder when absent or blank
    pub fn title(mut self, title: Option<&str>) -> Self {
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            self.result.title = title.to_string();
        }
        self
    }

    /// Join author names with ", ", keeping the placeholder when none are given
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = authors
            .into_iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        if !joined.is_empty() {
            self.result.author = joined;
        }
        self
    }

    /// Build the BookResult
    pub fn build(self) -> BookResult {
        self.result
    }
}
