//! Crawler module for catalog page fetching and processing
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching of catalog search pages
//! - Listing extraction from page markup
//! - Pacing between upstream requests
//! - Pagination across source pages and random sampling
//! - Overall per-category coordination

mod coordinator;
mod fetcher;
mod pacer;
mod pagination;
mod parser;
mod sampler;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{Coordinator, Listings, RunOutcome};
pub use fetcher::{build_http_client, user_agent_string, CatalogFetcher, HttpFetcher};
pub use pacer::{Pacer, Sleeper, TokioSleeper};
pub use pagination::{CategoryHarvest, Harvester};
pub use parser::{extract_listings, Extraction, ExtractionGap, ListingField, Record};
pub use sampler::Sampler;

use crate::config::Config;
use crate::request::CatalogRequest;
use crate::MarketError;

/// Runs a complete request against the configured catalog
///
/// This is the main entry point. It will:
/// 1. Build the HTTP-backed coordinator
/// 2. Validate the request against the category allow-list
/// 3. Harvest and sample each category
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `request` - The caller's request
///
/// # Returns
///
/// * `Ok(RunOutcome)` - Listings per category and run statistics
/// * `Err(MarketError)` - The request was rejected or the client could not be built
pub async fn collect(config: &Config, request: CatalogRequest) -> Result<RunOutcome, MarketError> {
    let mut coordinator = Coordinator::new(config)?;
    Ok(coordinator.collect(request).await?)
}
