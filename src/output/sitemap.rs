//! Sitemap XML rendering
//!
//! Produces a flat `urlset` document, one `url` element per record, in record
//! order. Nothing is deduplicated or dropped.

use crate::record::Record;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Namespace of the sitemap protocol
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Writes the sitemap for `records` to `writer`
///
/// # Arguments
///
/// * `records` - The ordered record set
/// * `escape_locations` - XML-escape `&`, `<` and `>` in locations; when
///   false, locations are written verbatim
/// * `writer` - Destination of the document
pub fn write_sitemap<W: Write>(
    records: &[Record],
    escape_locations: bool,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<urlset xmlns="{}">"#, SITEMAP_NAMESPACE)?;

    for record in records {
        let location: Cow<'_, str> = if escape_locations {
            html_escape::encode_text(&record.location)
        } else {
            Cow::Borrowed(record.location.as_str())
        };

        writeln!(writer, "    <url>")?;
        writeln!(writer, "        <loc>{}</loc>", location)?;
        writeln!(writer, "        <lastmod>{}</lastmod>", record.lastmod())?;
        writeln!(
            writer,
            "        <changefreq>{}</changefreq>",
            record.change_frequency
        )?;
        writeln!(
            writer,
            "        <priority>{}</priority>",
            record.priority_text()
        )?;
        writeln!(writer, "    </url>")?;
    }

    writeln!(writer, "</urlset>")?;
    writer.flush()
}

/// Formats the sitemap for `records` as a string
pub fn format_sitemap(records: &[Record], escape_locations: bool) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_sitemap(records, escape_locations, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes the sitemap for `records` to the file at `path`
pub fn write_sitemap_file(
    records: &[Record],
    escape_locations: bool,
    path: &Path,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_sitemap(records, escape_locations, &mut writer)
}
