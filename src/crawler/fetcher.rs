//! Page fetching
//!
//! The crawl only needs one capability from the network: turn a URL into an
//! HTML body. [`PageFetcher`] is that seam; [`HttpFetcher`] implements it
//! with `reqwest`.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::SitemapError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Source of raw page bodies
pub trait PageFetcher {
    /// Fetches the page at `url` and returns its body
    ///
    /// Unreachable URLs and non-success statuses are errors.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, SitemapError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawler settings (request timeout)
///
/// # Example
///
/// ```no_run
/// use forum_sitemap::config::{CrawlerConfig, UserAgentConfig};
/// use forum_sitemap::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, SitemapError> {
        Ok(Self::new(build_http_client(user_agent, crawler)?))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SitemapError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SitemapError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SitemapError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| SitemapError::Http {
            url: url.to_string(),
            source,
        })
    }
}
