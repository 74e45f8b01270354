//! Ad-Radar main entry point
//!
//! This is the command-line interface for the Ad-Radar listing monitor.

use ad_radar::config::{collect_targets, load_config_with_hash, Config};
use ad_radar::monitor::Monitor;
use ad_radar::storage::{open_storage, Storage};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Ad-Radar: a classified-ads listing monitor
///
/// Ad-Radar scans the newest result pages of each monitored listing, finds
/// ads it has not seen before, extracts their details and sends a digest.
/// Run it periodically (cron, systemd timer) to be told about new ads.
#[derive(Parser, Debug)]
#[command(name = "ad-radar")]
#[command(version = "1.0.0")]
#[command(about = "A classified-ads listing monitor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the number of result pages scanned per target
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Validate config and list the targets without fetching anything
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, cli.max_pages)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_run(config, &config_hash, cli.max_pages).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ad_radar=info,warn"),
            1 => EnvFilter::new("ad_radar=debug,info"),
            2 => EnvFilter::new("ad_radar=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be scanned
fn handle_dry_run(config: &Config, max_pages: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Ad-Radar Dry Run ===\n");

    println!("Site:");
    println!("  Domain: {}", config.site.domain);
    println!("  Scheme: {}", config.site.scheme);

    println!("\nScraper:");
    println!(
        "  Max pages: {}",
        max_pages.unwrap_or(config.scraper.max_pages)
    );
    println!("  Workers: {}", config.scraper.workers);
    println!("  Request delay: {}ms", config.scraper.request_delay_ms);
    println!("  Request timeout: {}s", config.scraper.request_timeout_secs);
    println!(
        "  Currency markers: {}",
        config.scraper.currency_markers.join(", ")
    );

    println!("\nStorage:");
    println!("  Database: {}", config.storage.database_path);

    println!("\nNotifications:");
    match &config.telegram {
        Some(telegram) => println!("  Telegram chat {}", telegram.chat_id),
        None => println!("  Log only"),
    }

    let targets = collect_targets(config)?;
    println!("\nTargets ({}):", targets.len());
    for target in &targets {
        println!("  - {}", target);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would scan {} target(s)", targets.len());

    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Database: {}\n", config.storage.database_path);

    let storage = open_storage(Path::new(&config.storage.database_path))?;

    println!("Seen ads: {}", storage.count_seen()?);
    for (target, count) in storage.count_seen_by_target()? {
        println!("  {:>6}  {}", count, target);
    }

    println!("\nRuns: {}", storage.count_runs()?);
    if let Some(run) = storage.get_latest_run()? {
        println!("Latest run #{}:", run.id);
        println!("  Started: {}", run.started_at);
        if let Some(finished) = &run.finished_at {
            println!("  Finished: {}", finished);
        }
        println!("  Status: {}", run.status.to_db_string());
        println!("  Targets: {}", run.counters.targets);
        println!("  Invalid targets: {}", run.counters.invalid_targets);
        println!("  Ads found: {}", run.counters.ads_found);
        println!("  New ads: {}", run.counters.new_ads);
        println!("  Ads extracted: {}", run.counters.ads_extracted);
        println!("  Digests sent: {}", run.counters.notifications);
    }

    Ok(())
}

/// Handles the main monitoring run
async fn handle_run(
    config: Config,
    config_hash: &str,
    max_pages: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let targets = collect_targets(&config)?;
    if targets.is_empty() {
        tracing::warn!("No target URLs configured, nothing to do");
        return Ok(());
    }

    let storage = open_storage(Path::new(&config.storage.database_path))?;
    let mut monitor = Monitor::new(&config, storage)?;
    if let Some(max_pages) = max_pages {
        monitor = monitor.with_max_pages(max_pages);
    }

    match monitor.run(&targets, config_hash).await {
        Ok(_) => {
            tracing::info!("Run completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
