//! Listing item extraction
//!
//! Every listing item carries a link to its destination and a `span.date`
//! with the last update time. Malformed items are fatal: a crawl that cannot
//! read an item stops instead of producing an incomplete sitemap.

use crate::{Result, SitemapError};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Format of the dates printed on listing pages (`15/03/2024 10:30`)
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

const ANCHOR_SELECTOR: &str = "a";
const DATE_SELECTOR: &str = "span.date";
const PAGINATION_SELECTOR: &str = "div.pages";
const MORE_ATTRIBUTE: &str = "data-more";

/// Location and timestamp of one listing item
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedItem {
    pub location: String,
    pub last_modified: DateTime<FixedOffset>,
}

/// Parses a CSS selector, reporting the offending text on failure
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SitemapError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Parses a listing date and pins it to the site's UTC offset
///
/// `page_url` only labels the error.
pub fn parse_timestamp(
    text: &str,
    offset: FixedOffset,
    page_url: &str,
) -> Result<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text, DATE_FORMAT).map_err(|source| {
        SitemapError::DateParse {
            url: page_url.to_string(),
            text: text.to_string(),
            source,
        }
    })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| SitemapError::AmbiguousDate {
            url: page_url.to_string(),
            text: text.to_string(),
        })
}

/// Extracts listing items matching one selection rule
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    item: Selector,
    anchor: Selector,
    date: Selector,
    pagination: Selector,
    offset: FixedOffset,
    link_base: Option<Url>,
}

impl RecordExtractor {
    /// Creates an extractor for items matching `item_rule`
    ///
    /// Dates are interpreted in `offset`.
    pub fn new(item_rule: &str, offset: FixedOffset) -> Result<Self> {
        Ok(Self {
            item: parse_selector(item_rule)?,
            anchor: parse_selector(ANCHOR_SELECTOR)?,
            date: parse_selector(DATE_SELECTOR)?,
            pagination: parse_selector(PAGINATION_SELECTOR)?,
            offset,
            link_base: None,
        })
    }

    /// Resolves extracted links against `base` instead of keeping them verbatim
    pub fn with_link_base(mut self, base: Url) -> Self {
        self.link_base = Some(base);
        self
    }

    /// Extracts every item on the page, in document order
    ///
    /// Fails on the first item that lacks a link or a readable date.
    pub fn extract(&self, page: &Html, page_url: &str) -> Result<Vec<ExtractedItem>> {
        page.select(&self.item)
            .map(|item| -> Result<ExtractedItem> {
                Ok(ExtractedItem {
                    location: self.item_location(item, page_url)?,
                    last_modified: self.item_date(item, page_url)?,
                })
            })
            .collect()
    }

    /// Returns the date of the first item on the page
    ///
    /// Listings are sorted by last activity, so this is the newest update.
    pub fn first_item_date(&self, page: &Html, page_url: &str) -> Result<DateTime<FixedOffset>> {
        let item = page
            .select(&self.item)
            .next()
            .ok_or_else(|| SitemapError::EmptyListing {
                url: page_url.to_string(),
            })?;
        self.item_date(item, page_url)
    }

    fn item_location(&self, item: ElementRef<'_>, page_url: &str) -> Result<String> {
        let href = item
            .select(&self.anchor)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .filter(|href| !href.is_empty())
            .ok_or_else(|| SitemapError::MissingElement {
                url: page_url.to_string(),
                element: "anchor",
            })?;

        match &self.link_base {
            Some(base) => Ok(base.join(href)?.to_string()),
            None => Ok(href.to_string()),
        }
    }

    fn item_date(&self, item: ElementRef<'_>, page_url: &str) -> Result<DateTime<FixedOffset>> {
        let missing = || SitemapError::MissingElement {
            url: page_url.to_string(),
            element: "date",
        };

        let span = item.select(&self.date).next().ok_or_else(missing)?;
        let text = span
            .children()
            .next()
            .and_then(|node| node.value().as_text())
            .ok_or_else(missing)?;

        parse_timestamp(text.trim(), self.offset, page_url)
    }

    /// Reads the pagination indicator of a listing page
    ///
    /// Only `data-more="yes"` means another page follows. A missing indicator
    /// or attribute, or any other value, ends the listing.
    pub fn has_more_pages(&self, page: &Html) -> bool {
        page.select(&self.pagination)
            .next()
            .and_then(|el| el.value().attr(MORE_ATTRIBUTE))
            == Some("yes")
    }
}
