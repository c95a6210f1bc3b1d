use crate::record::ChangeFrequency;
use chrono::FixedOffset;
use serde::Deserialize;

/// Main configuration structure
///
/// Every section is optional; missing sections and keys take the defaults
/// for the crunchy.rocks forum.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "category", default = "default_categories")]
    pub categories: Vec<ListingCategory>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Replaces the root URL and output path where an override is given
    pub fn with_overrides(mut self, root_url: Option<String>, output_path: Option<String>) -> Self {
        if let Some(root_url) = root_url {
            self.site.root_url = root_url;
        }
        if output_path.is_some() {
            self.output.path = output_path;
        }
        self
    }
}

/// Site being mapped
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL; also the location of the home entry
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Selector for the items listed on the home page
    #[serde(rename = "home-selector")]
    pub home_selector: String,

    /// Offset (in minutes east of UTC) the site prints its dates in
    #[serde(rename = "utc-offset-minutes")]
    pub utc_offset_minutes: i32,

    /// Resolve item links against the root URL instead of emitting them as-is
    #[serde(rename = "absolute-urls")]
    pub absolute_urls: bool,
}

impl SiteConfig {
    /// Returns the configured UTC offset, if it is in range
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: "https://crunchy.rocks/".to_string(),
            home_selector: "article.thread-item".to_string(),
            utc_offset_minutes: 0,
            absolute_urls: false,
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Upper bound on pages fetched per listing category
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Path segment that precedes the page number (`/threads/page/2`)
    #[serde(rename = "page-segment")]
    pub page_segment: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 10_000,
            page_segment: "page".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// `Name/Version`, with `(+ContactURL)` appended when a contact is set.
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the sitemap; standard output when unset
    pub path: Option<String>,

    /// XML-escape `&`, `<` and `>` in locations
    #[serde(rename = "escape-locations")]
    pub escape_locations: bool,
}

/// One crawlable section of the site
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingCategory {
    /// Path segment under the root URL (e.g. "threads")
    pub path: String,

    /// Selector for the item elements on each listing page
    pub selector: String,

    /// Change frequency assigned to every item of this category
    pub changefreq: ChangeFrequency,

    /// Priority assigned to every item of this category
    pub priority: f32,
}

impl ListingCategory {
    pub fn new(
        path: impl Into<String>,
        selector: impl Into<String>,
        changefreq: ChangeFrequency,
        priority: f32,
    ) -> Self {
        Self {
            path: path.into(),
            selector: selector.into(),
            changefreq,
            priority,
        }
    }
}

/// The forum sections crawled when no `[[category]]` is configured
pub fn default_categories() -> Vec<ListingCategory> {
    vec![
        ListingCategory::new("threads", "article.thread-item", ChangeFrequency::Daily, 0.6),
        ListingCategory::new("tags", "article.tag-item", ChangeFrequency::Daily, 0.5),
        ListingCategory::new("stiki", "article.thread-item", ChangeFrequency::Monthly, 0.7),
    ]
}
