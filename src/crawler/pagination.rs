//! Pagination-aware listing traversal
//!
//! A listing category is served as `/threads`, `/threads/page/2`,
//! `/threads/page/3`, ... Each page tells whether another one follows through
//! its pagination indicator. The driver walks the pages in order until that
//! flag stops saying "yes", or until the configured page limit is hit.

use crate::config::{CrawlerConfig, ListingCategory};
use crate::crawler::extractor::{ExtractedItem, RecordExtractor};
use crate::crawler::fetcher::PageFetcher;
use crate::record::Record;
use crate::{Result, SitemapError};
use scraper::Html;

/// Builds the URL of page `page` (2 and up) of a listing
///
/// # Example
///
/// ```
/// use forum_sitemap::crawler::page_url;
///
/// assert_eq!(page_url("https://crunchy.rocks/threads", "page", 3), "https://crunchy.rocks/threads/page/3");
/// ```
pub fn page_url(base_url: &str, segment: &str, page: u32) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), segment, page)
}

/// Walks every page of one listing category
pub struct PaginationDriver<'a, F> {
    fetcher: &'a F,
    max_pages: u32,
    page_segment: &'a str,
}

impl<'a, F: PageFetcher> PaginationDriver<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a CrawlerConfig) -> Self {
        Self {
            fetcher,
            max_pages: config.max_pages,
            page_segment: &config.page_segment,
        }
    }

    /// Collects the records of every page of the listing at `base_url`
    ///
    /// Records are tagged with the category's change frequency and priority
    /// and returned in page order, then in-page order.
    ///
    /// # Errors
    ///
    /// * any fetch or extraction error, on the first page that hits it
    /// * [`SitemapError::PaginationLimit`] if the last allowed page still
    ///   announces more pages
    pub async fn crawl(
        &self,
        base_url: &str,
        category: &ListingCategory,
        extractor: &RecordExtractor,
    ) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut page = 1;
        let mut url = base_url.to_string();

        loop {
            tracing::info!("--> Crawling {} ...", url);
            let body = self.fetcher.fetch(&url).await?;
            let (items, more) = read_page(&body, &url, extractor)?;

            tracing::debug!(page, items = items.len(), more, "Listing page read");
            records.extend(items.into_iter().map(|item| {
                Record::new(
                    item.location,
                    item.last_modified,
                    category.changefreq,
                    category.priority,
                )
            }));

            if !more {
                break;
            }

            if page >= self.max_pages {
                return Err(SitemapError::PaginationLimit {
                    url: base_url.to_string(),
                    limit: self.max_pages,
                });
            }

            page += 1;
            url = page_url(base_url, self.page_segment, page);
        }

        tracing::info!(
            "Found {} items in {} pages of /{}",
            records.len(),
            page,
            category.path
        );

        Ok(records)
    }
}

/// Parses one listing page into its items and its "more pages" flag
///
/// Kept synchronous so the parsed document never lives across an await.
fn read_page(
    body: &str,
    url: &str,
    extractor: &RecordExtractor,
) -> Result<(Vec<ExtractedItem>, bool)> {
    let document = Html::parse_document(body);
    let items = extractor.extract(&document, url)?;
    let more = extractor.has_more_pages(&document);
    Ok((items, more))
}
