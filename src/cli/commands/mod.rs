//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod fetch;
mod init;
mod load;
mod pipeline;
mod report;
mod stats;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use bestseller_pipeline::config::{load_settings, parse_date, DateRange, LoadOptions, Settings};
use bestseller_pipeline::repository::MissingDimensionPolicy;

#[derive(Parser)]
#[command(name = "bestsellers")]
#[command(about = "Bestseller list ingestion, dimensional modelling and reporting")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "BESTSELLERS_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config and DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Raw-data JSON artifact (overrides config and RAW_DATA_PATH)
    #[arg(long, global = true)]
    raw_data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Date range overrides shared by fetch, load and run.
#[derive(Args, Debug, Clone, Default)]
struct RangeArgs {
    /// First publication date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// Last publication date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,
}

impl RangeArgs {
    fn apply(&self, settings: &mut Settings) -> anyhow::Result<()> {
        let start = match &self.start {
            Some(value) => parse_date("--start", value)?,
            None => settings.date_range.start,
        };
        let end = match &self.end {
            Some(value) => parse_date("--end", value)?,
            None => settings.date_range.end,
        };
        settings.date_range = DateRange::new(start, end)?;
        Ok(())
    }
}

fn missing_policy(skip_missing: bool) -> MissingDimensionPolicy {
    if skip_missing {
        MissingDimensionPolicy::Skip
    } else {
        MissingDimensionPolicy::Abort
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and star schema
    Init,

    /// Fetch list-overview snapshots and write the raw-data artifact
    Fetch {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Load the raw-data artifact into the star schema
    Load {
        #[command(flatten)]
        range: RangeArgs,
        /// Skip rankings whose list, book or date is missing instead of aborting
        #[arg(long)]
        skip_missing: bool,
    },

    /// Run the report queries and export delimited files
    Report {
        /// Output directory (overrides config and OUTPUT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch, load and report in one go
    Run {
        #[command(flatten)]
        range: RangeArgs,
        /// Skip rankings whose list, book or date is missing instead of aborting
        #[arg(long)]
        skip_missing: bool,
    },

    /// Show row counts per table
    Stats,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        database_path: cli.database,
        raw_data_path: cli.raw_data,
    };
    let mut settings = load_settings(options)
        .await
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Fetch { range } => {
            range.apply(&mut settings)?;
            fetch::cmd_fetch(&settings).await
        }
        Commands::Load {
            range,
            skip_missing,
        } => {
            range.apply(&mut settings)?;
            load::cmd_load(&settings, missing_policy(skip_missing)).await
        }
        Commands::Report { output } => {
            if let Some(dir) = output {
                settings.output_dir = dir;
            }
            report::cmd_report(&settings).await
        }
        Commands::Run {
            range,
            skip_missing,
        } => {
            range.apply(&mut settings)?;
            pipeline::cmd_run(&settings, missing_policy(skip_missing)).await
        }
        Commands::Stats => stats::cmd_stats(&settings).await,
    }
}
