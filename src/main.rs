//! forum-sitemap main entry point
//!
//! This is the command-line interface for the forum sitemap generator.

use anyhow::Context;
use clap::Parser;
use forum_sitemap::config::{parse_config_with_hash, validate, Config};
use forum_sitemap::crawler::{listing_url, page_url, run_crawl};
use forum_sitemap::output::{emit_sitemap, log_statistics, SitemapStatistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// forum-sitemap: sitemap generator for paginated forums
///
/// Crawls the home page and every listing category of a forum, then prints
/// a sitemap with one entry per listed item.
#[derive(Parser, Debug)]
#[command(name = "forum-sitemap")]
#[command(version)]
#[command(about = "Generates a sitemap from a forum's listing pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Root URL of the site, overriding the configuration
    #[arg(long, value_name = "URL")]
    root_url: Option<String>,

    /// Write the sitemap to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if let Err(e) = handle_crawl(&config).await {
        tracing::error!("Crawl failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the sitemap.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("forum_sitemap=info,warn"),
            1 => EnvFilter::new("forum_sitemap=debug,info"),
            2 => EnvFilter::new("forum_sitemap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration and applies command-line overrides
///
/// Validation runs once, on the configuration the crawl will actually use.
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = parse_config_with_hash(path)
                .with_context(|| format!("reading {}", path.display()))?;
            tracing::info!("Configuration parsed (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let config = config.with_overrides(cli.root_url.clone(), cli.output.clone());

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== forum-sitemap Dry Run ===\n");

    println!("Site:");
    println!("  Root URL: {}", config.site.root_url);
    println!("  Home selector: {}", config.site.home_selector);
    println!("  UTC offset: {} min", config.site.utc_offset_minutes);
    println!("  Absolute URLs: {}", config.site.absolute_urls);

    println!("\nCrawler:");
    println!("  Max pages per category: {}", config.crawler.max_pages);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nCategories ({}):", config.categories.len());
    for category in &config.categories {
        let base = listing_url(&config.site.root_url, &category.path);
        println!(
            "  - {} [{}] {} {:.2}",
            base, category.selector, category.changefreq, category.priority
        );
        println!(
            "    then {}, ...",
            page_url(&base, &config.crawler.page_segment, 2)
        );
    }

    println!("\nOutput:");
    match &config.output.path {
        Some(path) => println!("  File: {}", path),
        None => println!("  Standard output"),
    }
    println!("  Escape locations: {}", config.output.escape_locations);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Mapping {} ({} categories)",
        config.site.root_url,
        config.categories.len()
    );

    let records = run_crawl(config).await.context("crawl aborted")?;

    log_statistics(&SitemapStatistics::from_records(&records));

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    emit_sitemap(&records, &config.output, &mut handle).context("writing sitemap")?;

    Ok(())
}
