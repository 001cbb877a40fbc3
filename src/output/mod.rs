//! Output module for presenting run results
//!
//! This module handles:
//! - Serializing sampled listings as JSON
//! - Recording and reporting run statistics

pub mod stats;

pub use stats::{log_statistics, HarvestStatistics};

use crate::crawler::Listings;

/// Serializes listings as a JSON object of category -> records
///
/// # Arguments
///
/// * `listings` - The sampled listings of a run
/// * `pretty` - Whether to indent the output
///
/// # Returns
///
/// * `Ok(String)` - The JSON document
/// * `Err(serde_json::Error)` - Serialization failed
pub fn render_json(listings: &Listings, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(listings)
    } else {
        serde_json::to_string(listings)
    }
}
