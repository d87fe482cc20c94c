//! Configuration file discovery and generation.
//!
//! # Configuration File Format
//!
//! ```toml
//! [downloads]
//! output_dir = "~/Desktop/book_fetcher"
//! chunk_size = 8192
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//!
//! [sources]
//! enabled = ["openlibrary", "gutenberg", "google_books"]
//! google_books_max_results = 5
//!
//! [logging]
//! level = "warn"
//! format = "json"
//! ```
//!
//! A leading `~` in `output_dir` expands to the home directory.

use std::path::{Path, PathBuf};

use super::Config;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "book-fetcher.toml";

/// Find the first existing configuration file.
///
/// Looks for `./book-fetcher.toml`, then `<config dir>/book-fetcher/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("book-fetcher").join("config.toml"));
    }

    candidates.into_iter().find(|p| p.is_file())
}

/// Save configuration to a TOML file, creating parent directories
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
