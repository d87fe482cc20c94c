//! Streaming downloads of selected books.

use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::{book_filename, HttpClient};
use crate::config::DownloadConfig;
use crate::models::BookResult;
use crate::ui::{Reporter, Status};

/// Default streaming chunk size in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Errors that can occur while downloading a book
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Transport failure while connecting or reading the body
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Server returned status: {0}")]
    Status(reqwest::StatusCode),

    /// Creating the output directory or writing the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::Network(err.to_string())
    }
}

/// A completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Where the file was written
    pub path: PathBuf,

    /// Bytes written to disk
    pub bytes: u64,
}

/// Writes selected books into one output directory.
///
/// When the server advertises a content length the body is streamed in fixed
/// size chunks with a progress update after each one; otherwise the whole
/// body is buffered and written at once. A failed download may leave a
/// truncated file behind.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: HttpClient,
    output_dir: PathBuf,
    chunk_size: usize,
}

impl Downloader {
    pub fn new(client: HttpClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn from_config(client: HttpClient, config: &DownloadConfig) -> Self {
        Self::new(client, &config.output_dir).with_chunk_size(config.chunk_size)
    }

    /// Set the streaming chunk size (at least one byte)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Path the book will be written to
    pub fn destination(&self, book: &BookResult) -> PathBuf {
        self.output_dir.join(book_filename(book.title(), book.format()))
    }

    /// Create the output directory and its parents if missing
    pub async fn ensure_output_dir(&self) -> Result<(), DownloadError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        Ok(())
    }

    /// Download a book, reporting the outcome and returning whether it succeeded
    pub async fn download(&self, book: &BookResult, reporter: &mut dyn Reporter) -> bool {
        match self.fetch(book, reporter).await {
            Ok(outcome) => {
                info!(
                    path = %outcome.path.display(),
                    bytes = outcome.bytes,
                    "Download finished"
                );
                reporter.notice(
                    Status::Success,
                    &format!("Successfully downloaded to: {}", outcome.path.display()),
                );
                true
            }
            Err(e) => {
                warn!(url = book.download_url(), error = %e, "Download failed");
                reporter.progress_done();
                reporter.notice(Status::Error, &format!("Error downloading book: {}", e));
                false
            }
        }
    }

    /// Download a book into the output directory
    pub async fn fetch(
        &self,
        book: &BookResult,
        reporter: &mut dyn Reporter,
    ) -> Result<DownloadOutcome, DownloadError> {
        self.ensure_output_dir().await?;

        let path = self.destination(book);
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!(url = book.download_url(), path = %path.display(), "Downloading book");

        let mut response = self.client.download_get(book.download_url()).send().await?;
        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status()));
        }

        let total = response.content_length().filter(|&len| len > 0);
        let mut file = File::create(&path).await?;

        let bytes = match total {
            None => {
                debug!("No content length, buffering body");
                reporter.notice(Status::Download, &format!("Downloading {}...", label));
                let body = response.bytes().await?;
                file.write_all(&body).await?;
                body.len() as u64
            }
            Some(total) => {
                let mut progress = ProgressTracker::new(total);
                let mut buffer: Vec<u8> = Vec::with_capacity(self.chunk_size);

                while let Some(chunk) = response.chunk().await? {
                    buffer.extend_from_slice(&chunk);

                    while buffer.len() >= self.chunk_size {
                        let rest = buffer.split_off(self.chunk_size);
                        file.write_all(&buffer).await?;
                        progress.advance(buffer.len(), &label, reporter);
                        buffer = rest;
                    }
                }

                if !buffer.is_empty() {
                    file.write_all(&buffer).await?;
                    progress.advance(buffer.len(), &label, reporter);
                }

                reporter.progress_done();
                progress.received
            }
        };

        file.flush().await?;

        Ok(DownloadOutcome { path, bytes })
    }
}

/// Percentage bookkeeping for a download of known length.
///
/// Only strictly increasing percentages are reported.
#[derive(Debug)]
struct ProgressTracker {
    total: u64,
    received: u64,
    last_percent: f64,
}

impl ProgressTracker {
    fn new(total: u64) -> Self {
        Self {
            total,
            received: 0,
            last_percent: 0.0,
        }
    }

    fn percent(&self) -> f64 {
        (self.received as f64 / self.total as f64 * 100.0).min(100.0)
    }

    fn advance(&mut self, bytes: usize, label: &str, reporter: &mut dyn Reporter) {
        self.received += bytes as u64;
        let percent = self.percent();
        if percent > self.last_percent {
            self.last_percent = percent;
            reporter.progress(label, percent);
        }
    }
}
