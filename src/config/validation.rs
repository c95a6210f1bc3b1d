use crate::config::types::{Config, CrawlerConfig, ListingCategory, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_categories(&config.categories)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let root = Url::parse(&config.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-url: {}", e)))?;

    if root.scheme() != "http" && root.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root-url '{}' must use http or https",
            config.root_url
        )));
    }

    validate_selector(&config.home_selector)?;

    if config.utc_offset().is_none() {
        return Err(ConfigError::Validation(format!(
            "utc-offset-minutes must be strictly between -1440 and 1440, got {}",
            config.utc_offset_minutes
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.page_segment.is_empty() || config.page_segment.contains('/') {
        return Err(ConfigError::Validation(format!(
            "page-segment must be a single non-empty path segment, got '{}'",
            config.page_segment
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

/// Validates the listing category table
fn validate_categories(categories: &[ListingCategory]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[category]] is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in categories {
        let path = category.path.trim_matches('/');
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "category path cannot be empty".to_string(),
            ));
        }

        if !seen.insert(path) {
            return Err(ConfigError::Validation(format!(
                "category '{}' is declared more than once",
                path
            )));
        }

        validate_selector(&category.selector)?;

        if !category.priority.is_finite() || !(0.0..=1.0).contains(&category.priority) {
            return Err(ConfigError::Validation(format!(
                "priority of category '{}' must be between 0.0 and 1.0, got {}",
                path, category.priority
            )));
        }
    }

    Ok(())
}

/// Checks that a CSS selector parses
fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {}", selector, e)))
}
