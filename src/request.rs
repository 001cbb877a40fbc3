//! Request validation against the category allow-list
//!
//! A [`CatalogRequest`] is untrusted input. Only a [`ValidatedRequest`], which
//! can be obtained solely through [`CategoryAllowList::validate`], is accepted
//! by the crawler, so an unknown category never reaches the network.

use crate::config::CategoriesConfig;
use crate::ValidationError;
use serde::Deserialize;

/// Default caller-facing page number
pub const DEFAULT_PAGE_NUMBER: u32 = 1;

/// Default number of records per category
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A caller's request for sampled listings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogRequest {
    pub categories: Vec<String>,
    #[serde(rename = "page-number", default = "default_page_number")]
    pub page_number: u32,
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_number() -> u32 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl CatalogRequest {
    /// Creates a request with the default page number and size
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page(mut self, page_number: u32, page_size: u32) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }
}

/// Caller-facing paging parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageWindow {
    /// Number of source pages to walk for this window
    ///
    /// Counts the listings needed through the requested page, not the listings
    /// on that page alone, so page 2 also re-reads page 1's source pages.
    ///
    /// ```
    /// use market_sampler::request::PageWindow;
    ///
    /// let window = PageWindow { page_number: 1, page_size: 25 };
    /// assert_eq!(window.pages_needed(10), 3);
    /// ```
    pub fn pages_needed(&self, items_per_page: u32) -> u32 {
        let total = u64::from(self.page_number) * u64::from(self.page_size);
        let per_page = u64::from(items_per_page.max(1));
        // Saturates for windows beyond u32::MAX source pages
        u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX)
    }
}

/// A request whose categories are all on the allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    categories: Vec<String>,
    window: PageWindow,
}

impl ValidatedRequest {
    /// Requested categories, deduplicated, in request order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }
}

/// The fixed set of categories callers may request
#[derive(Debug, Clone)]
pub struct CategoryAllowList {
    allowed: Vec<String>,
}

impl CategoryAllowList {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &CategoriesConfig) -> Self {
        Self::new(config.allowed.iter().cloned())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == category)
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Checks a request against the allow-list
    ///
    /// Category keys are matched exactly. Repeated keys are collapsed so each
    /// category is crawled once. An empty category set is valid, and so is a
    /// zero page number or size; such windows need no source pages.
    ///
    /// # Returns
    ///
    /// * `Ok(ValidatedRequest)` - Every category is allowed
    /// * `Err(ValidationError)` - The first category not on the allow-list
    pub fn validate(&self, request: CatalogRequest) -> Result<ValidatedRequest, ValidationError> {
        let mut categories: Vec<String> = Vec::with_capacity(request.categories.len());
        for category in request.categories {
            if !self.contains(&category) {
                return Err(ValidationError::UnknownCategory {
                    category,
                    allowed: self.allowed.clone(),
                });
            }

            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Ok(ValidatedRequest {
            categories,
            window: PageWindow {
                page_number: request.page_number,
                page_size: request.page_size,
            },
        })
    }
}
