//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key has a default, so an empty file (or no file at all) maps
//! the crunchy.rocks forum.
//!
//! # Example
//!
//! ```no_run
//! use forum_sitemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitemap.toml")).unwrap();
//! println!("Mapping {}", config.site.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_categories, Config, CrawlerConfig, ListingCategory, OutputConfig, SiteConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, parse_config, parse_config_with_hash};
pub use validation::validate;
