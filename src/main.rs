//! Fightstats scraper main entry point
//!
//! This is the command-line interface for the event and fighter scraper.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fightstats_scraper::config::{load_or_default, Config};
use fightstats_scraper::crawler::{CrawlSummary, Crawler, HttpContext};
use fightstats_scraper::storage::{open_store, Store};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Fightstats scraper: event and fighter records from ufcstats.com
///
/// With no command, crawls every completed event and then every fighter,
/// appending the records to the configured SQLite database.
#[derive(Parser, Debug)]
#[command(name = "fightstats-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrapes event and fighter records", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Crawl events, then fighters (default)
    Crawl,
    /// Crawl the completed-events listing only
    Events,
    /// Crawl the per-letter fighter listings only
    Fighters,
    /// Drop and recreate the event and fighter tables
    Setup,
    /// Show row counts and exit
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    match &cli.config {
        Some(path) => tracing::info!("Configuration loaded from: {}", path.display()),
        None => tracing::info!("Using built-in configuration"),
    }

    match cli.command.unwrap_or(Command::Crawl) {
        Command::Setup => handle_setup(&config),
        Command::Stats => handle_stats(&config),
        command => handle_crawl(config, command).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fightstats_scraper=info,warn"),
            1 => EnvFilter::new("fightstats_scraper=debug,info"),
            2 => EnvFilter::new("fightstats_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `setup`: drops and recreates the tables
fn handle_setup(config: &Config) -> anyhow::Result<()> {
    let mut store = open_store(Path::new(&config.output.database_path))?;
    store.reset()?;
    println!(
        "✓ Recreated ufc_events and fighters in {}",
        config.output.database_path
    );
    Ok(())
}

/// Handles `stats`: prints row counts
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = open_store(Path::new(&config.output.database_path))?;

    println!("Database: {}\n", config.output.database_path);
    println!("  Events:   {}", store.count_events()?);
    println!("  Fighters: {}", store.count_fighters()?);

    Ok(())
}

/// Handles the crawl commands
async fn handle_crawl(config: Config, command: Command) -> anyhow::Result<()> {
    tracing::info!(
        "Writing to {} (on page error: {:?})",
        config.output.database_path,
        config.crawler.on_page_error
    );

    let context = HttpContext::new(&config.user_agent, &config.crawler)?;
    let store = open_store(Path::new(&config.output.database_path))?;
    let mut crawler = Crawler::new(config, context, store);

    let result: Result<CrawlSummary, _> = match command {
        Command::Events => crawler.run_event_crawl().await,
        Command::Fighters => crawler.run_fighter_crawl().await,
        _ => crawler.run().await,
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                "Crawl completed: {} listings, {} pages, {} records saved, {} skipped",
                summary.listings,
                summary.pages_visited,
                summary.records_saved,
                summary.pages_skipped
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
