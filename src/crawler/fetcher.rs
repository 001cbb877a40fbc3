//! Catalog page fetcher
//!
//! This module handles the HTTP side of the crawler:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for catalog pages
//! - Classifying failures as [`FetchError`]
//!
//! Fetches are never retried here; a failed page is the pagination driver's
//! concern.

use crate::config::UserAgentConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of catalog page markup
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetches `url` and returns the response body as text
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Formats the user agent: CrawlerName/Version (+ContactURL; ContactEmail)
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use market_sampler::config::UserAgentConfig;
/// use market_sampler::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "MarketSampler".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches catalog pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher with a client configured from the user agent settings
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl CatalogFetcher for HttpFetcher {
    /// Sends a single GET request
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | body text |
    /// | other status | `FetchError::Status` |
    /// | connect/timeout/TLS failure | `FetchError::Transport` |
    /// | body read/decode failure | `FetchError::Body` |
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }
}
