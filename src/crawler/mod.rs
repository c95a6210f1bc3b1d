//! Crawler module for listing traversal
//!
//! This module contains the crawling logic, including:
//! - Page fetching behind the [`PageFetcher`] trait
//! - Item extraction from listing pages
//! - Pagination of listing categories
//! - Overall crawl orchestration

mod extractor;
mod fetcher;
mod orchestrator;
mod pagination;

pub use extractor::{parse_selector, parse_timestamp, ExtractedItem, RecordExtractor, DATE_FORMAT};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use orchestrator::{
    listing_url, run_crawl, CrawlOrchestrator, HOME_CHANGE_FREQUENCY, HOME_PRIORITY,
};
pub use pagination::{page_url, PaginationDriver};
