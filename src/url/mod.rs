//! Catalog page URL construction
//!
//! Builds the search URL for one category and one source page of the
//! upstream catalog.

use crate::config::CatalogConfig;
use crate::ConfigError;
use url::Url;

/// Path of the catalog search page, relative to the configured base URL
const SEARCH_PATH: &str = "market/search";

/// Builds per-page catalog search URLs
///
/// The search endpoint is resolved once from the configuration, so building
/// an individual page URL cannot fail.
#[derive(Debug, Clone)]
pub struct PageUrlBuilder {
    search_url: Url,
    app_id: u32,
    category_facet: String,
    category_tag_prefix: String,
}

impl PageUrlBuilder {
    /// Creates a builder from the catalog configuration
    ///
    /// # Returns
    ///
    /// * `Ok(PageUrlBuilder)` - The search endpoint was resolved
    /// * `Err(ConfigError)` - The base URL could not be parsed or joined
    pub fn new(catalog: &CatalogConfig) -> Result<Self, ConfigError> {
        let mut base = Url::parse(&catalog.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

        // Url::join replaces the last path segment unless it ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let search_url = base
            .join(SEARCH_PATH)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search URL: {}", e)))?;

        Ok(Self {
            search_url,
            app_id: catalog.app_id,
            category_facet: catalog.category_facet.clone(),
            category_tag_prefix: catalog.category_tag_prefix.clone(),
        })
    }

    /// Builds the search URL for `category` on 1-based source page `page`
    ///
    /// The category key is lowercased before it is embedded in the facet tag.
    /// Pages after the first carry a `p{page}_popular_desc` fragment.
    ///
    /// # Example
    ///
    /// ```
    /// use market_sampler::config::CatalogConfig;
    /// use market_sampler::url::PageUrlBuilder;
    ///
    /// let builder = PageUrlBuilder::new(&CatalogConfig::default()).unwrap();
    /// let url = builder.page_url("Viper", 2);
    /// assert!(url.as_str().contains("tag_npc_dota_hero_viper"));
    /// assert_eq!(url.fragment(), Some("p2_popular_desc"));
    /// ```
    pub fn page_url(&self, category: &str, page: u32) -> Url {
        let mut url = self.search_url.clone();
        let app = self.app_id.to_string();
        let tag = format!("{}{}", self.category_tag_prefix, category.to_lowercase());

        url.query_pairs_mut()
            .clear()
            .append_pair("q", "")
            .append_pair(
                &format!("category_{}_{}[]", app, self.category_facet),
                &tag,
            )
            .append_pair(&format!("category_{}_Slot[]", app), "any")
            .append_pair(&format!("category_{}_Type[]", app), "any")
            .append_pair("appid", &app);

        if page > 1 {
            url.set_fragment(Some(&format!("p{}_popular_desc", page)));
        }

        url
    }
}
