//! Market-Sampler main entry point
//!
//! This is the command-line interface for the Market-Sampler listing sampler.

use anyhow::Context;
use clap::Parser;
use market_sampler::config::{load_config_with_hash, Config};
use market_sampler::crawler::collect;
use market_sampler::output::{log_statistics, render_json};
use market_sampler::request::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use market_sampler::{CatalogRequest, Coordinator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Market-Sampler: a paced catalog listing sampler
///
/// Market-Sampler walks the search pages of a market catalog for each
/// requested category, extracts the listings, and prints a random sample
/// of them per category as JSON.
#[derive(Parser, Debug)]
#[command(name = "market-sampler")]
#[command(version = "1.0.0")]
#[command(about = "A paced catalog listing sampler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Category to sample (repeatable or comma-separated)
    #[arg(short, long = "category", value_name = "CATEGORY", value_delimiter = ',')]
    categories: Vec<String>,

    /// 1-based page number
    #[arg(long, default_value_t = DEFAULT_PAGE_NUMBER)]
    page_number: u32,

    /// Number of records per category
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Validate config and request and show the URLs that would be fetched
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let request = CatalogRequest::new(cli.categories.iter().cloned())
        .with_page(cli.page_number, cli.page_size);

    if cli.dry_run {
        handle_dry_run(&config, request)
    } else {
        handle_collect(&config, request, cli.pretty).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the JSON result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("market_sampler=info,warn"),
            1 => EnvFilter::new("market_sampler=debug,info"),
            2 => EnvFilter::new("market_sampler=trace,debug"),
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

/// Handles the --dry-run mode: validates input and lists the URLs to fetch
fn handle_dry_run(config: &Config, request: CatalogRequest) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config)?;
    let validated = coordinator.allow_list().validate(request)?;
    let window = validated.window();
    let pages_needed = coordinator.pages_per_category(window);

    println!("=== Market-Sampler Dry Run ===\n");

    println!("Catalog:");
    println!("  Base URL: {}", config.catalog.base_url);
    println!("  App id: {}", config.catalog.app_id);
    println!("  Items per source page: {}", config.catalog.items_per_page);
    println!(
        "  Max source pages per category: {}",
        config.catalog.max_pages_per_category
    );
    println!("  Pacing delay: {}ms", config.pacing.delay_ms);

    println!("\nRequest:");
    println!("  Page number: {}", window.page_number);
    println!("  Page size: {}", window.page_size);
    println!("  Source pages per category: {}", pages_needed);

    for category in validated.categories() {
        println!("\n{}:", category);
        for page in 1..=pages_needed {
            println!("  {}", coordinator.urls().page_url(category, page));
        }
    }

    let total = pages_needed as u64 * validated.categories().len() as u64;
    println!("\n✓ Configuration and request are valid");
    println!(
        "✓ Would fetch {} pages (at least {}ms of pacing)",
        total,
        total.saturating_sub(1) * config.pacing.delay_ms
    );

    Ok(())
}

/// Handles the main collection run
async fn handle_collect(config: &Config, request: CatalogRequest, pretty: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Requested categories: {} (allowed: {})",
        request.categories.join(", "),
        config.categories.allowed.join(", ")
    );

    let outcome = match collect(config, request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            return Err(e.into());
        }
    };

    log_statistics(&outcome.statistics);

    println!("{}", render_json(&outcome.listings, pretty)?);

    Ok(())
}
