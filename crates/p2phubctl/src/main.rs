//! p2phubctl - CLI for the P2PHub progression engine.
//!
//! Validates catalog files and evaluates progress snapshots offline.

use anyhow::Result;
use clap::{Parser, Subcommand};
use p2phub_progress::config::config_path;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("P2PHUB_GIT_SHA"),
    " ",
    env!("P2PHUB_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "p2phubctl")]
#[command(about = "Inspect P2PHub catalogs and progress snapshots", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Config file (default: ./p2phub.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a catalog and list rejected entries
    Validate {
        /// Catalog file (overrides config)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Evaluate one entry against a snapshot
    Evaluate {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Entry id
        #[arg(long)]
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Show the active missions list
    List {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Count down verification timers by the configured interval
    Tick {
        #[arg(long)]
        snapshot: PathBuf,

        /// Number of intervals to advance
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },

    /// Show status counts and the next unlock
    Summary {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_file = cli.config.unwrap_or_else(config_path);
    let config = p2phubctl::load_config(&config_file)?;
    p2phubctl::init_logging(&config.log.level);
    debug!("config: {}", config_file.display());

    let output = match cli.command {
        Commands::Validate { catalog } => {
            let (catalog, rejected) = p2phubctl::load_catalog(&config, catalog.as_deref())?;
            let (report, ok) = p2phubctl::validate_report(&catalog, &rejected);
            print!("{}", report);
            return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
        }
        Commands::Evaluate {
            snapshot,
            catalog,
            id,
            json,
        } => {
            let catalog = checked_catalog(&config, catalog)?;
            let snapshot = p2phubctl::load_snapshot(&snapshot)?;
            p2phubctl::render_evaluation(&catalog, &snapshot, &id, json)?
        }
        Commands::List {
            snapshot,
            catalog,
            json,
        } => {
            let catalog = checked_catalog(&config, catalog)?;
            let snapshot = p2phubctl::load_snapshot(&snapshot)?;
            p2phubctl::render_list(&catalog, &snapshot, json)?
        }
        Commands::Tick { snapshot, steps } => {
            let snapshot = p2phubctl::load_snapshot(&snapshot)?;
            p2phubctl::render_tick(&config, &snapshot, steps)?
        }
        Commands::Summary {
            snapshot,
            catalog,
            json,
        } => {
            let catalog = checked_catalog(&config, catalog)?;
            let snapshot = p2phubctl::load_snapshot(&snapshot)?;
            p2phubctl::render_summary(&catalog, &snapshot, json)?
        }
    };

    println!("{}", output);
    Ok(ExitCode::SUCCESS)
}

/// Load the catalog; rejected entries are logged and skipped
fn checked_catalog(
    config: &p2phub_progress::EngineConfig,
    path: Option<PathBuf>,
) -> Result<p2phub_progress::Catalog> {
    let (catalog, rejected) = p2phubctl::load_catalog(config, path.as_deref())?;
    if !rejected.is_empty() {
        warn!("{} catalog entries rejected, run `p2phubctl validate`", rejected.len());
    }
    Ok(catalog)
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
