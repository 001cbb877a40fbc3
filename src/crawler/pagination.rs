//! Pagination driver - walks a category's source pages
//!
//! For one category this module:
//! - Works out how many source pages the requested window needs, capped
//!   per category
//! - Builds, paces, fetches and extracts each page in order
//! - Absorbs page failures, which only shrink the candidate pool

use crate::crawler::fetcher::CatalogFetcher;
use crate::crawler::pacer::Pacer;
use crate::crawler::parser::{extract_listings, Record};
use crate::request::PageWindow;
use crate::state::{PageOutcome, PageReport};
use crate::url::PageUrlBuilder;

/// Everything collected for one category
#[derive(Debug)]
pub struct CategoryHarvest {
    pub category: String,

    /// Records from all pages, in page order
    pub records: Vec<Record>,

    /// One report per source page attempted
    pub pages: Vec<PageReport>,
}

impl CategoryHarvest {
    pub fn pages_failed(&self) -> usize {
        self.pages.iter().filter(|p| p.outcome.is_error()).count()
    }

    pub fn gaps(&self) -> usize {
        self.pages.iter().map(|p| p.outcome.gaps().len()).sum()
    }
}

/// Characters of each fetched body shown in trace logs
const BODY_PREVIEW_CHARS: usize = 500;

/// Shared inputs of the pagination driver
pub struct Harvester<'a> {
    pub fetcher: &'a dyn CatalogFetcher,
    pub urls: &'a PageUrlBuilder,
    pub items_per_page: u32,
    pub max_pages: u32,
}

impl Harvester<'_> {
    /// Collects the records for `category` needed to serve `window`
    ///
    /// Source pages `1..=pages_needed` are fetched strictly in order, each
    /// released by `pacer`. A page that fails to fetch is logged and recorded
    /// as [`PageOutcome::Failed`]; the remaining pages are still attempted.
    /// Up to `window.page_size` listings are taken from each fetched page.
    /// At most `max_pages` source pages are walked.
    pub async fn harvest_category(
        &self,
        pacer: &mut Pacer,
        category: &str,
        window: PageWindow,
    ) -> CategoryHarvest {
        let pages_needed = self.pages_to_walk(window);
        let max_items = usize::try_from(window.page_size).unwrap_or(usize::MAX);

        tracing::info!(
            "Harvesting {}: {} source page(s) for page {} x {}",
            category,
            pages_needed,
            window.page_number,
            window.page_size
        );

        let mut harvest = CategoryHarvest {
            category: category.to_string(),
            records: Vec::new(),
            pages: Vec::new(),
        };

        for page in 1..=pages_needed {
            let url = self.urls.page_url(category, page);

            pacer.before_fetch().await;
            tracing::info!("Fetching {} page {}: {}", category, page, url);

            let outcome = match self.fetcher.fetch(&url).await {
                Ok(body) => {
                    tracing::trace!(
                        "{} page {} body: {}",
                        category,
                        page,
                        body_preview(&body, BODY_PREVIEW_CHARS)
                    );
                    let extraction = extract_listings(&body, category, max_items);
                    if extraction.is_empty() {
                        PageOutcome::Exhausted
                    } else {
                        let records = extraction.records.len();
                        harvest.records.extend(extraction.records);
                        PageOutcome::Extracted {
                            records,
                            gaps: extraction.gaps,
                        }
                    }
                }
                Err(error) => {
                    tracing::error!("Failed to fetch {} page {}: {}", category, page, error);
                    PageOutcome::Failed { error }
                }
            };

            tracing::debug!(
                "{} page {} {}: {} record(s)",
                category,
                page,
                outcome.label(),
                outcome.records()
            );
            harvest.pages.push(PageReport { page, url, outcome });
        }

        tracing::info!(
            "Harvested {} record(s) for {} ({} page(s) failed, {} listing(s) skipped)",
            harvest.records.len(),
            category,
            harvest.pages_failed(),
            harvest.gaps()
        );

        harvest
    }

    /// Source pages needed for `window`, limited to `max_pages`
    pub fn pages_to_walk(&self, window: PageWindow) -> u32 {
        let pages_needed = window.pages_needed(self.items_per_page);
        if pages_needed > self.max_pages {
            tracing::warn!(
                "Page {} x {} needs {} source pages; walking only the first {}",
                window.page_number,
                window.page_size,
                pages_needed,
                self.max_pages
            );
            return self.max_pages;
        }
        pages_needed
    }
}

/// Leading `max_chars` characters of `body`
fn body_preview(body: &str, max_chars: usize) -> &str {
    match body.char_indices().nth(max_chars) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
