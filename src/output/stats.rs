//! Crawl statistics
//!
//! Summarises a finished record set for the log: how many entries were found,
//! how they split across change frequencies, and the span of `lastmod` dates.

use crate::record::{ChangeFrequency, Record};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;

/// Statistics about a generated sitemap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitemapStatistics {
    /// Total number of entries
    pub total_entries: usize,

    /// Number of distinct locations
    pub unique_locations: usize,

    /// Entry count per change frequency
    pub entries_by_frequency: BTreeMap<ChangeFrequency, usize>,

    /// Most recent `lastmod`
    pub newest: Option<DateTime<FixedOffset>>,

    /// Oldest `lastmod`
    pub oldest: Option<DateTime<FixedOffset>>,
}

impl SitemapStatistics {
    /// Computes statistics over `records`
    pub fn from_records(records: &[Record]) -> Self {
        let mut stats = Self {
            total_entries: records.len(),
            unique_locations: records
                .iter()
                .map(|r| r.location.as_str())
                .collect::<std::collections::HashSet<_>>()
                .len(),
            ..Self::default()
        };

        for record in records {
            *stats
                .entries_by_frequency
                .entry(record.change_frequency)
                .or_insert(0) += 1;

            let when = record.last_modified;
            stats.newest = Some(stats.newest.map_or(when, |n| n.max(when)));
            stats.oldest = Some(stats.oldest.map_or(when, |o| o.min(when)));
        }

        stats
    }

    /// Number of entries that repeat an earlier location
    pub fn duplicate_entries(&self) -> usize {
        self.total_entries - self.unique_locations
    }
}

/// Logs the statistics at info level
pub fn log_statistics(stats: &SitemapStatistics) {
    tracing::info!(
        "Sitemap: {} entries ({} unique locations)",
        stats.total_entries,
        stats.unique_locations
    );

    for (frequency, count) in &stats.entries_by_frequency {
        tracing::info!("  {:<8} {:>6}", frequency.as_str(), count);
    }

    if let (Some(oldest), Some(newest)) = (stats.oldest, stats.newest) {
        tracing::info!("  lastmod range: {} .. {}", oldest, newest);
    }

    if stats.duplicate_entries() > 0 {
        tracing::debug!(
            "{} entries repeat an earlier location",
            stats.duplicate_entries()
        );
    }
}
