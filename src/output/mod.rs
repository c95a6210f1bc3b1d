//! Output module for generated sitemaps
//!
//! This module handles:
//! - Rendering records as a sitemap document
//! - Writing it to standard output or a file
//! - Summarising the record set for the log

mod sitemap;
pub mod stats;

pub use sitemap::{format_sitemap, write_sitemap, write_sitemap_file, SITEMAP_NAMESPACE};
pub use stats::{log_statistics, SitemapStatistics};

use crate::config::OutputConfig;
use crate::record::Record;
use std::io::Write;
use std::path::Path;

/// Emits the sitemap where the output configuration says
///
/// Writes to `output.path` when set, otherwise to `stdout`.
pub fn emit_sitemap<W: Write>(
    records: &[Record],
    output: &OutputConfig,
    stdout: &mut W,
) -> std::io::Result<()> {
    match &output.path {
        Some(path) => {
            write_sitemap_file(records, output.escape_locations, Path::new(path))?;
            tracing::info!("Sitemap written to {}", path);
            Ok(())
        }
        None => write_sitemap(records, output.escape_locations, stdout),
    }
}
