use serde::Deserialize;

/// Main configuration structure for Market-Sampler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub categories: CategoriesConfig,
}

/// Upstream catalog layout
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Root of the catalog site; search pages live under `market/search`
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Application id used in the facet parameter names and `appid`
    #[serde(rename = "app-id", default = "default_app_id")]
    pub app_id: u32,

    /// Facet the category key filters on (e.g. "Hero")
    #[serde(rename = "category-facet", default = "default_category_facet")]
    pub category_facet: String,

    /// Prefix prepended to the lowercased category key to form the facet tag
    #[serde(rename = "category-tag-prefix", default = "default_category_tag_prefix")]
    pub category_tag_prefix: String,

    /// Number of listings the catalog renders per source page
    #[serde(rename = "items-per-page", default = "default_items_per_page")]
    pub items_per_page: u32,

    /// Upper bound on source pages walked for one category in one run
    #[serde(
        rename = "max-pages-per-category",
        default = "default_max_pages_per_category"
    )]
    pub max_pages_per_category: u32,
}

/// Inter-request pacing
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Pause between consecutive upstream fetches (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Categories callers may request
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    pub allowed: Vec<String>,
}

fn default_base_url() -> String {
    "https://steamcommunity.com".to_string()
}

fn default_app_id() -> u32 {
    570
}

fn default_category_facet() -> String {
    "Hero".to_string()
}

fn default_category_tag_prefix() -> String {
    "tag_npc_dota_hero_".to_string()
}

fn default_items_per_page() -> u32 {
    10
}

fn default_max_pages_per_category() -> u32 {
    50
}

fn default_delay_ms() -> u64 {
    2000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            app_id: default_app_id(),
            category_facet: default_category_facet(),
            category_tag_prefix: default_category_tag_prefix(),
            items_per_page: default_items_per_page(),
            max_pages_per_category: default_max_pages_per_category(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}
