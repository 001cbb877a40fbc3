//! Configuration module for Market-Sampler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use market_sampler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("market-sampler.toml")).unwrap();
//! println!("Allowed categories: {:?}", config.categories.allowed);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, CategoriesConfig, Config, PacingConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

/// Largest `max-pages-per-category` accepted from configuration
pub const MAX_PAGES_PER_CATEGORY_LIMIT: u32 = 1000;

/// Smallest pacing delay accepted from configuration (milliseconds)
pub const MIN_PACING_DELAY_MS: u64 = 500;
