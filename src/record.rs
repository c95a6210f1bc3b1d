//! Sitemap URL entries
//!
//! A [`Record`] is one crawlable destination together with the freshness and
//! priority hints that end up in the sitemap.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::fmt;

/// How often a page is expected to change
///
/// Assigned per listing category, never discovered from the page itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Hourly,
    Daily,
    Monthly,
}

impl ChangeFrequency {
    /// Returns the sitemap vocabulary term for this frequency
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One URL entry of the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Absolute or site-relative URL, emitted as-is
    pub location: String,

    /// Last modification time of the destination
    pub last_modified: DateTime<FixedOffset>,

    /// Expected change frequency
    pub change_frequency: ChangeFrequency,

    /// Relative priority in `[0.0, 1.0]`
    pub priority: f32,
}

impl Record {
    /// Creates a new record
    pub fn new(
        location: impl Into<String>,
        last_modified: DateTime<FixedOffset>,
        change_frequency: ChangeFrequency,
        priority: f32,
    ) -> Self {
        Self {
            location: location.into(),
            last_modified,
            change_frequency,
            priority,
        }
    }

    /// Formats `last_modified` as W3C datetime with an explicit offset
    pub fn lastmod(&self) -> String {
        self.last_modified.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    }

    /// Formats the priority with exactly two decimals
    pub fn priority_text(&self) -> String {
        format!("{:.2}", self.priority)
    }
}
