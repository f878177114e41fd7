// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{RunOutcome, SkipReason, classify, run_once};
pub use data::{JsonTableFile, LoadRawTable, RawTable, normalize};
pub use domain::{BarQuery, MarketState, Zones};
pub use models::{ClassificationResult, PriceSeries, PriceTriple};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
// CLI argument parsing
use clap::Parser;

use crate::config::{DEFAULT_TABLE_PATH, WATCH};

/// Exit code for a run that was skipped while `--strict` is set
pub const SKIPPED_EXIT_CODE: u8 = 3;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Price-table dump to classify. `{instrument}` is replaced by the instrument id
    #[arg(long, default_value = DEFAULT_TABLE_PATH)]
    pub table: String,

    /// Instrument to classify instead of the deployed one
    #[arg(long)]
    pub instrument: Option<String>,

    /// JSON file with `sup_low`, `sup_high`, `res_low`, `res_high` overriding the deployed zones
    #[arg(long)]
    pub zones_file: Option<PathBuf>,

    /// Exit non-zero when the run is skipped, so a scheduler can tell it apart from a success
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Print the outcome as JSON instead of a status line
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn load_zones_file(path: &Path) -> Result<Zones> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read zones file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse zones file: {}", path.display()))
}

/// Combine the deployed watch with any command-line overrides.
pub fn resolve_watch(args: &Cli) -> Result<(BarQuery, Zones)> {
    let mut query = WATCH.query().map_err(|e| anyhow!(e))?;
    if let Some(instrument) = &args.instrument {
        query.instrument = instrument.trim().to_string();
    }
    let zones = match &args.zones_file {
        Some(path) => load_zones_file(path)?,
        None => WATCH.zones,
    };
    Ok((query, zones))
}

/// Main application entry point - one classification run
pub fn run_app(args: &Cli) -> Result<RunOutcome> {
    let (query, zones) = resolve_watch(args)?;
    let sources: Vec<Box<dyn LoadRawTable>> = vec![Box::new(JsonTableFile::new(&args.table))];
    run_once(&sources, &query, &zones)
}

pub fn outcome_exit_code(outcome: &RunOutcome, strict: bool) -> u8 {
    match outcome {
        RunOutcome::Skipped(_) if strict => SKIPPED_EXIT_CODE,
        _ => 0,
    }
}
