//! Ticket Exporter CLI
//!
//! Fetches every configured resource type once and writes the combined table.

use std::path::PathBuf;

use clap::Parser;
use ticket_exporter::{error::Result, models::Config, pipeline};

/// ticket-exporter - Ticketing API to CSV/XLSX exporter
#[derive(Parser, Debug)]
#[command(
    name = "ticket-exporter",
    version,
    about = "Export incidents and service requests to CSV and XLSX"
)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, default_value = "ticket-exporter.toml")]
    config: PathBuf,

    /// Override the output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("Loaded environment from {}", path.display());
    }

    let mut config = if cli.config.exists() {
        Config::load_or_default(&cli.config)
    } else {
        Config::default()
    };

    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let outcome = match pipeline::run_pipeline(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Export failed: {}", e);
            return Err(e);
        }
    };

    for (tag, count) in &outcome.per_resource {
        log::info!("{}: {} rows", tag, count);
    }
    log::info!(
        "Exported {} rows to {} files (run date {})",
        outcome.row_count,
        outcome.files.len(),
        outcome.run_date
    );

    Ok(())
}
