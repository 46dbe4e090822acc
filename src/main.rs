//! Alive main entry point
//!
//! Command-line interface for the URL liveness checker.

use alive::config::{RunConfig, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use alive::pipeline;
use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Alive: a concurrent URL liveness checker
///
/// Loads the registered URLs from a catalog endpoint, probes each one with a
/// HEAD request, and writes the resulting status records back in batches.
#[derive(Parser, Debug)]
#[command(name = "alive")]
#[command(version = "1.0.0")]
#[command(about = "Checks which catalog URLs are currently alive", long_about = None)]
struct Cli {
    /// REST endpoint where the URLs are listed and their statuses updated
    #[arg(short, long)]
    api: Option<String>,

    /// Number of concurrent workers used to check the URLs (capped at 256)
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Seconds to wait for an HTTP response (capped at 10)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Status records submitted per persistence page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Bulk-delete the previous run's statuses before inserting fresh ones
    #[arg(long)]
    refresh: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // The endpoint is the one mandatory argument; everything else has a
    // default. Missing endpoint is the only condition reflected in the exit
    // code; a run that reaches the network always exits 0 and reports
    // failures through the log.
    let Some(api) = cli.api.clone() else {
        eprintln!("Missing catalog REST endpoint (--api)\n");
        let _ = Cli::command().print_help();
        std::process::exit(1);
    };

    let total_start = Instant::now();
    if let Err(e) = run(cli, api).await {
        tracing::error!("Run failed: {:#}", e);
    }
    tracing::info!("Total elapsed time: {:?}", total_start.elapsed());
}

/// Builds the run configuration and drives the pipeline once.
async fn run(cli: Cli, api: String) -> anyhow::Result<()> {
    let mut config =
        RunConfig::new(api, cli.workers, cli.timeout).context("Invalid configuration")?;
    config.page_size = cli.page_size.max(1);
    config.refresh = cli.refresh;

    let summary = pipeline::run(&config).await.context("Pipeline run failed")?;

    tracing::info!(
        "Run complete: {} URLs checked, {}/{} pages persisted",
        summary.urls_loaded,
        summary.persistence.pages_submitted,
        summary.persistence.pages_total()
    );
    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("alive=info,warn"),
            1 => EnvFilter::new("alive=debug,info"),
            2 => EnvFilter::new("alive=trace,debug"),
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
