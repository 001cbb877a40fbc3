//! Run statistics
//!
//! This module accumulates per-category harvest figures over a run and
//! reports them once the run is over.

use crate::crawler::CategoryHarvest;
use chrono::{DateTime, Utc};

/// Summary of one coordinated run
#[derive(Debug, Clone)]
pub struct HarvestStatistics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of categories processed
    pub categories: usize,

    /// Source pages requested from the catalog
    pub pages_attempted: usize,

    /// Source pages whose fetch failed
    pub pages_failed: usize,

    /// Listing containers dropped for missing fields
    pub listings_skipped: usize,

    /// Records extracted before sampling
    pub records_harvested: usize,

    /// Records returned after sampling
    pub records_returned: usize,

    /// Pacing pauses taken during the run
    pub pacing_pauses: u64,
}

impl HarvestStatistics {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            categories: 0,
            pages_attempted: 0,
            pages_failed: 0,
            listings_skipped: 0,
            records_harvested: 0,
            records_returned: 0,
            pacing_pauses: 0,
        }
    }

    /// Adds one category's figures
    ///
    /// `harvested` and `returned` are passed separately because the records
    /// have already been handed to the sampler.
    pub fn record_category(&mut self, harvest: &CategoryHarvest, harvested: usize, returned: usize) {
        self.categories += 1;
        self.pages_attempted += harvest.pages.len();
        self.pages_failed += harvest.pages_failed();
        self.listings_skipped += harvest.gaps();
        self.records_harvested += harvested;
        self.records_returned += returned;
    }

    /// Marks the run as finished
    pub fn finish(&mut self, pacing_pauses: u64) {
        self.pacing_pauses = pacing_pauses;
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Share of attempted pages that were fetched, in percent
    pub fn success_rate(&self) -> f64 {
        if self.pages_attempted == 0 {
            return 0.0;
        }
        let fetched = self.pages_attempted - self.pages_failed;
        (fetched as f64 / self.pages_attempted as f64) * 100.0
    }
}

/// Logs statistics at info level
pub fn log_statistics(stats: &HarvestStatistics) {
    tracing::info!(
        "Run finished: {} categories, {} records returned ({} harvested)",
        stats.categories,
        stats.records_returned,
        stats.records_harvested
    );
    tracing::info!(
        "Pages: {} attempted, {} failed ({:.1}% fetched), {} listings skipped, {} pacing pauses",
        stats.pages_attempted,
        stats.pages_failed,
        stats.success_rate(),
        stats.listings_skipped,
        stats.pacing_pauses
    );

    if let Some(duration) = stats.duration() {
        tracing::info!("Elapsed: {}ms", duration.num_milliseconds());
    }
}
