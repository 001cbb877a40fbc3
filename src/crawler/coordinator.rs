//! Category coordinator - main orchestration logic
//!
//! This module runs a validated request end to end:
//! - Harvests each requested category in turn
//! - Samples each category's records down to the page size
//! - Assembles the category -> records mapping and run statistics
//!
//! Categories never fail individually; a category without listings maps to
//! an empty list.

use crate::config::Config;
use crate::crawler::fetcher::{CatalogFetcher, HttpFetcher};
use crate::crawler::pacer::Pacer;
use crate::crawler::pagination::Harvester;
use crate::crawler::parser::Record;
use crate::crawler::sampler::Sampler;
use crate::output::HarvestStatistics;
use crate::request::{CatalogRequest, CategoryAllowList, PageWindow, ValidatedRequest};
use crate::url::PageUrlBuilder;
use crate::{MarketError, ValidationError};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Sampled records per category
pub type Listings = BTreeMap<String, Vec<Record>>;

/// Result of one coordinated run
#[derive(Debug)]
pub struct RunOutcome {
    /// One entry per requested category, possibly empty
    pub listings: Listings,

    pub statistics: HarvestStatistics,
}

/// Main coordinator structure
pub struct Coordinator {
    allow_list: CategoryAllowList,
    urls: PageUrlBuilder,
    items_per_page: u32,
    max_pages: u32,
    fetcher: Arc<dyn CatalogFetcher>,
    pacer: Pacer,
    sampler: Sampler,
}

impl Coordinator {
    /// Creates a coordinator that talks to the configured catalog over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MarketError)` - The catalog URL or HTTP client could not be set up
    pub fn new(config: &Config) -> Result<Self, MarketError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent)?;
        let pacer = Pacer::new(Duration::from_millis(config.pacing.delay_ms));

        Self::with_parts(config, Arc::new(fetcher), pacer, Sampler::new())
    }

    /// Creates a coordinator from explicit collaborators
    pub fn with_parts(
        config: &Config,
        fetcher: Arc<dyn CatalogFetcher>,
        pacer: Pacer,
        sampler: Sampler,
    ) -> Result<Self, MarketError> {
        Ok(Self {
            allow_list: CategoryAllowList::from_config(&config.categories),
            urls: PageUrlBuilder::new(&config.catalog)?,
            items_per_page: config.catalog.items_per_page,
            max_pages: config.catalog.max_pages_per_category,
            fetcher,
            pacer,
            sampler,
        })
    }

    pub fn allow_list(&self) -> &CategoryAllowList {
        &self.allow_list
    }

    pub fn urls(&self) -> &PageUrlBuilder {
        &self.urls
    }

    /// Source pages each category will walk for `window`
    pub fn pages_per_category(&self, window: PageWindow) -> u32 {
        self.harvester().pages_to_walk(window)
    }

    fn harvester(&self) -> Harvester<'_> {
        Harvester {
            fetcher: self.fetcher.as_ref(),
            urls: &self.urls,
            items_per_page: self.items_per_page,
            max_pages: self.max_pages,
        }
    }

    /// Validates `request` against the allow-list, then runs it
    ///
    /// Nothing is fetched when validation fails.
    pub async fn collect(&mut self, request: CatalogRequest) -> Result<RunOutcome, ValidationError> {
        let validated = self.allow_list.validate(request)?;
        Ok(self.run(&validated).await)
    }

    /// Runs a validated request
    ///
    /// Categories are processed one after another. Pacing carries over from
    /// one category to the next, so the delay separates every pair of
    /// consecutive fetches.
    pub async fn run(&mut self, request: &ValidatedRequest) -> RunOutcome {
        let started_at = Utc::now();
        let pauses_before = self.pacer.pauses();
        let window = request.window();
        let page_size = usize::try_from(window.page_size).unwrap_or(usize::MAX);

        tracing::info!(
            "Starting run for {} categor{} (page {}, size {})",
            request.categories().len(),
            if request.categories().len() == 1 { "y" } else { "ies" },
            window.page_number,
            window.page_size
        );

        let harvester = Harvester {
            fetcher: self.fetcher.as_ref(),
            urls: &self.urls,
            items_per_page: self.items_per_page,
            max_pages: self.max_pages,
        };

        let mut listings = Listings::new();
        let mut statistics = HarvestStatistics::new(started_at);

        for category in request.categories() {
            let mut harvest = harvester
                .harvest_category(&mut self.pacer, category, window)
                .await;

            let records = std::mem::take(&mut harvest.records);
            let available = records.len();
            let sampled = self.sampler.sample(records, page_size);

            tracing::info!(
                "Selected {} of {} record(s) for {}",
                sampled.len(),
                available,
                category
            );

            statistics.record_category(&harvest, available, sampled.len());
            listings.insert(category.clone(), sampled);
        }

        statistics.finish(self.pacer.pauses() - pauses_before);

        RunOutcome {
            listings,
            statistics,
        }
    }
}
