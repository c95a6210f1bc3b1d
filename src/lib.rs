//! forum-sitemap: a sitemap generator for paginated forum listings
//!
//! This crate walks the listing pages of a forum-style site, extracts the
//! URL and last-modified timestamp of every item it finds, and renders the
//! result as a sitemap document.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for sitemap generation
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed date '{text}' on {url}: {source}")]
    DateParse {
        url: String,
        text: String,
        source: chrono::ParseError,
    },

    #[error("Date '{text}' on {url} does not name a single instant")]
    AmbiguousDate { url: String, text: String },

    #[error("Missing {element} element on {url}")]
    MissingElement { url: String, element: &'static str },

    #[error("No listing items found on {url}")]
    EmptyListing { url: String },

    #[error("Pagination did not terminate for {url} after {limit} pages")]
    PaginationLimit { url: String, limit: u32 },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for sitemap operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, ListingCategory};
pub use crawler::{run_crawl, CrawlOrchestrator, HttpFetcher, PageFetcher};
pub use output::{format_sitemap, write_sitemap};
pub use record::{ChangeFrequency, Record};
