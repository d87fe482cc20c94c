//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

use crate::config::HttpConfig;

/// Shared HTTP client with sensible defaults
///
/// Search requests carry a total timeout; download requests only a connect
/// timeout, since a large file may legitimately take longer than a search.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    search_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a client from configuration
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let user_agent = config.user_agent.clone().unwrap_or_else(default_user_agent);

        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            search_timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// GET request for a catalog search, bounded by the search timeout
    pub fn search_get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).timeout(self.search_timeout)
    }

    /// GET request for a file download
    pub fn download_get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent() {
        assert!(default_user_agent().starts_with("book-fetcher/"));
    }

    #[test]
    fn test_client_from_config() {
        let config = HttpConfig {
            timeout_secs: 3,
            ..Default::default()
        };
        let client = HttpClient::from_config(&config).unwrap();
        assert_eq!(client.search_timeout, Duration::from_secs(3));
    }
}
