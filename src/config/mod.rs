//! Configuration management.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `BOOK_FETCHER_` (sections separated by
//! `__`, e.g. `BOOK_FETCHER_DOWNLOADS__OUTPUT_DIR`).

mod file_config;

pub use file_config::{find_config_file, save_config, ConfigFileError, CONFIG_FILE_NAME};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sources::DEFAULT_MAX_RESULTS;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BOOK_FETCHER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Download settings
    #[serde(default)]
    pub downloads: DownloadConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Catalog selection
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Download configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory downloaded books are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Streaming chunk size in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// `~/Desktop/book_fetcher`, or `./book_fetcher` when no home directory is known
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("Desktop").join("book_fetcher"))
        .unwrap_or_else(|| PathBuf::from("book_fetcher"))
}

/// Replace a leading `~` component with the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn default_chunk_size() -> usize {
    8192
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for catalog search requests, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout for every request, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Custom User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Source selection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Only query these source ids (all built-in sources when unset)
    #[serde(default)]
    pub enabled: Option<Vec<String>>,

    /// `maxResults` sent to Google Books
    #[serde(default = "default_google_max_results")]
    pub google_books_max_results: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            google_books_max_results: default_google_max_results(),
        }
    }
}

fn default_google_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither `-v`/`-q` nor `RUST_LOG` say otherwise
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` for JSON lines, anything else for human-readable output
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Load configuration from an optional file layered under environment variables
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("sources.enabled")
                .try_parsing(true),
        )
        .build()?;

    let mut config: Config = settings.try_deserialize()?;
    config.downloads.output_dir = expand_home(&config.downloads.output_dir);
    Ok(config)
}
