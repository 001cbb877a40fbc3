//! Market-Sampler: a paced catalog listing sampler
//!
//! This crate walks the paginated search results of a server-rendered market
//! catalog, extracts item listings per category, and returns a randomly
//! sampled subset of them for each requested category.

pub mod config;
pub mod crawler;
pub mod output;
pub mod request;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Market-Sampler operations
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Request rejections raised before any network activity
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown category '{category}'. Allowed categories: {}", allowed.join(", "))]
    UnknownCategory {
        category: String,
        allowed: Vec<String>,
    },
}

/// Failure to retrieve a single catalog page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Body { url, .. } => url,
        }
    }
}

/// Result type alias for Market-Sampler operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, Record, RunOutcome};
pub use request::{CatalogRequest, CategoryAllowList, ValidatedRequest};
pub use crate::url::PageUrlBuilder;
