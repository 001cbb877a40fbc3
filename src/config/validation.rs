use crate::config::types::{CatalogConfig, CategoriesConfig, Config, PacingConfig, UserAgentConfig};
use crate::config::{MAX_PAGES_PER_CATEGORY_LIMIT, MIN_PACING_DELAY_MS};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_pacing_config(&config.pacing)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_categories_config(&config.categories)?;
    Ok(())
}

/// Validates the upstream catalog layout
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if config.app_id == 0 {
        return Err(ConfigError::Validation("app_id must be >= 1".to_string()));
    }

    if config.category_facet.trim().is_empty() {
        return Err(ConfigError::Validation(
            "category_facet cannot be empty".to_string(),
        ));
    }

    if config.category_tag_prefix.trim().is_empty() {
        return Err(ConfigError::Validation(
            "category_tag_prefix cannot be empty".to_string(),
        ));
    }

    if config.items_per_page < 1 || config.items_per_page > 100 {
        return Err(ConfigError::Validation(format!(
            "items_per_page must be between 1 and 100, got {}",
            config.items_per_page
        )));
    }

    if config.max_pages_per_category < 1
        || config.max_pages_per_category > MAX_PAGES_PER_CATEGORY_LIMIT
    {
        return Err(ConfigError::Validation(format!(
            "max_pages_per_category must be between 1 and {}, got {}",
            MAX_PAGES_PER_CATEGORY_LIMIT, config.max_pages_per_category
        )));
    }

    Ok(())
}

/// Validates pacing configuration
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.delay_ms < MIN_PACING_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "delay_ms must be >= {}ms, got {}ms",
            MIN_PACING_DELAY_MS, config.delay_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates the category allow-list
fn validate_categories_config(config: &CategoriesConfig) -> Result<(), ConfigError> {
    if config.allowed.is_empty() {
        return Err(ConfigError::Validation(
            "categories.allowed must list at least one category".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &config.allowed {
        validate_category_key(category)?;

        if !seen.insert(category.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Category '{}' is listed more than once",
                category
            )));
        }
    }

    Ok(())
}

/// Validates a single category key
///
/// Keys are embedded verbatim into the facet tag, which the catalog matches
/// in lowercase.
fn validate_category_key(category: &str) -> Result<(), ConfigError> {
    if category.is_empty() {
        return Err(ConfigError::Validation(
            "Category key cannot be empty".to_string(),
        ));
    }

    if !category
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "Category '{}' must contain only lowercase letters, digits and underscores",
            category
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
