//! Cagestats main entry point
//!
//! This is the command-line interface for the cagestats UFC results harvester.

use cagestats::config::load_config;
use cagestats::harvest::{Harvester, RunOutcome};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Exit status when some fights had to be skipped.
const EXIT_COMPLETED_WITH_SKIPS: u8 = 2;

/// Exit status when the run was interrupted and partial data was saved.
const EXIT_INTERRUPTED: u8 = 3;

/// Cagestats: a UFC results harvester
///
/// Cagestats scrapes completed events from the UFC statistics site into a
/// SQLite database and a flat CSV export, resuming incrementally from the
/// most recent stored event.
#[derive(Parser, Debug)]
#[command(name = "cagestats")]
#[command(version = "1.0.0")]
#[command(about = "A UFC results harvester", long_about = None)]
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

    /// Validate config and show what would be harvested without fetching
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        return handle_harvest(config).await;
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cagestats=info,warn"),
            1 => EnvFilter::new("cagestats=debug,info"),
            2 => EnvFilter::new("cagestats=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &cagestats::Config) -> cagestats::Result<()> {
    println!("=== Cagestats Dry Run ===\n");

    println!("Scrape Configuration:");
    println!("  Listing URL: {}", config.scrape.listing_url);
    println!("  User agent: {}", config.scrape.user_agent);
    println!(
        "  Max concurrent fetches: {}",
        config.scrape.max_concurrent_fetches
    );
    match config.scrape.cutoff() {
        Some(date) => println!("  Cutoff date: {}", date),
        None => println!("  Cutoff date: latest stored event"),
    }

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &cagestats::Config) -> cagestats::Result<()> {
    use cagestats::storage::SqliteStorage;
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let storage = SqliteStorage::open(Path::new(&config.output.database_path))?;
    println!("Events:   {}", storage.count_events()?);
    println!("Fights:   {}", storage.count_fights()?);
    println!("Fighters: {}", storage.count_fighters()?);
    println!("Rounds:   {}", storage.count_rounds()?);
    match storage.latest_event_date()? {
        Some(date) => println!("Latest event: {}", date),
        None => println!("Latest event: none"),
    }

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: cagestats::Config) -> ExitCode {
    let mut harvester = match Harvester::new(config) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to initialize harvester: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Ctrl-C stops the run at the next event boundary; the harvester
    // flushes everything gathered so far before exiting.
    let interrupt = harvester.interrupt_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current event then saving");
            interrupt.store(true, Ordering::SeqCst);
        }
    });

    match harvester.run().await {
        Ok(RunOutcome::Completed) => {
            tracing::info!("Harvest completed");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::CompletedWithSkips { skipped }) => {
            tracing::warn!("Harvest completed with {} skipped fight(s)", skipped);
            ExitCode::from(EXIT_COMPLETED_WITH_SKIPS)
        }
        Ok(RunOutcome::Interrupted) => {
            tracing::warn!("Harvest interrupted; partial results saved");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
