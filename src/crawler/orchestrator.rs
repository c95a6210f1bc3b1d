//! Crawl orchestration
//!
//! A crawl maps the whole site in a fixed order:
//!
//! 1. the home page, dated by its most recently updated item
//! 2. every listing category, in declared order, through the
//!    [`PaginationDriver`]
//!
//! The first error ends the crawl; no partial record set is returned.

use crate::config::{validate, Config, CrawlerConfig, ListingCategory};
use crate::crawler::extractor::RecordExtractor;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::pagination::PaginationDriver;
use crate::record::{ChangeFrequency, Record};
use crate::{ConfigError, Result};
use chrono::FixedOffset;
use scraper::Html;
use url::Url;

/// Change frequency of the home entry
pub const HOME_CHANGE_FREQUENCY: ChangeFrequency = ChangeFrequency::Hourly;

/// Priority of the home entry
pub const HOME_PRIORITY: f32 = 1.0;

/// Joins the root URL and a category path with exactly one slash
///
/// # Example
///
/// ```
/// use forum_sitemap::crawler::listing_url;
///
/// assert_eq!(listing_url("https://crunchy.rocks/", "threads"), "https://crunchy.rocks/threads");
/// ```
pub fn listing_url(root_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        root_url.trim_end_matches('/'),
        path.trim_matches('/')
    )
}

/// Main crawl coordinator
pub struct CrawlOrchestrator<F> {
    fetcher: F,
    root_url: String,
    home_selector: String,
    categories: Vec<ListingCategory>,
    crawler: CrawlerConfig,
    offset: FixedOffset,
    link_base: Option<Url>,
}

impl<F: PageFetcher> CrawlOrchestrator<F> {
    /// Creates an orchestrator for the site described by `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` fails validation, so an
    /// out-of-range priority or a bad selector never reaches a crawl.
    pub fn new(fetcher: F, config: &Config) -> Result<Self> {
        validate(config)?;

        let offset = config.site.utc_offset().ok_or_else(|| {
            ConfigError::Validation(format!(
                "utc-offset-minutes out of range: {}",
                config.site.utc_offset_minutes
            ))
        })?;

        let link_base = if config.site.absolute_urls {
            Some(Url::parse(&config.site.root_url)?)
        } else {
            None
        };

        Ok(Self {
            fetcher,
            root_url: config.site.root_url.clone(),
            home_selector: config.site.home_selector.clone(),
            categories: config.categories.clone(),
            crawler: config.crawler.clone(),
            offset,
            link_base,
        })
    }

    /// Returns the fetcher used by this orchestrator
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the ordered category table
    pub fn categories(&self) -> &[ListingCategory] {
        &self.categories
    }

    /// Runs the crawl and returns the ordered record set
    ///
    /// The home entry comes first, followed by one block per category.
    pub async fn crawl(&self) -> Result<Vec<Record>> {
        let mut records = vec![self.crawl_home().await?];

        let driver = PaginationDriver::new(&self.fetcher, &self.crawler);
        for category in &self.categories {
            let base_url = listing_url(&self.root_url, &category.path);
            tracing::info!("Crawling {} ...", base_url);

            let extractor = self.extractor(&category.selector)?;
            let found = driver.crawl(&base_url, category, &extractor).await?;
            records.extend(found);
        }

        tracing::info!("Crawl finished with {} sitemap entries", records.len());
        Ok(records)
    }

    /// Builds the home entry, dated by the first item listed on the root page
    async fn crawl_home(&self) -> Result<Record> {
        tracing::info!("Crawling {} ...", self.root_url);
        let body = self.fetcher.fetch(&self.root_url).await?;
        let extractor = self.extractor(&self.home_selector)?;

        let last_modified = {
            let document = Html::parse_document(&body);
            extractor.first_item_date(&document, &self.root_url)?
        };
        tracing::debug!("Home page last updated {}", last_modified);

        Ok(Record::new(
            self.root_url.clone(),
            last_modified,
            HOME_CHANGE_FREQUENCY,
            HOME_PRIORITY,
        ))
    }

    fn extractor(&self, selector: &str) -> Result<RecordExtractor> {
        let extractor = RecordExtractor::new(selector, self.offset)?;
        Ok(match &self.link_base {
            Some(base) => extractor.with_link_base(base.clone()),
            None => extractor,
        })
    }
}

/// Runs a complete crawl over HTTP
///
/// # Example
///
/// ```no_run
/// use forum_sitemap::config::Config;
/// use forum_sitemap::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let records = run_crawl(&Config::default()).await?;
/// println!("{} entries", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<Vec<Record>> {
    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
    CrawlOrchestrator::new(fetcher, config)?.crawl().await
}
