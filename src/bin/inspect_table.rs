use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use zone_watch::config::{DEFAULT_TABLE_PATH, WATCH};
use zone_watch::data::normalizer::{clean_closes, locate_close_column};
use zone_watch::data::source::read_table_file;

/// Show how a price-table dump will be read before trusting it to a run
#[derive(Parser, Debug)]
struct Args {
    #[arg(default_value = DEFAULT_TABLE_PATH)]
    path: PathBuf,

    #[arg(long)]
    instrument: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    inspect_table(&args)
}

fn inspect_table(args: &Args) -> Result<()> {
    let table = read_table_file(&args.path)
        .with_context(|| format!("Failed to inspect {:?}", args.path))?;

    println!(
        "Loaded {} rows x {} columns from {:?}",
        table.row_count(),
        table.columns().len(),
        args.path
    );
    for name in table.column_names() {
        println!("  column {}", name);
    }
    if let (Some(first), Some(last)) = (table.index().first(), table.index().last()) {
        println!("Rows run from {} to {}", first, last);
    }

    let mut query = WATCH.query().map_err(anyhow::Error::msg)?;
    if let Some(instrument) = &args.instrument {
        query.instrument = instrument.clone();
    }

    let column = locate_close_column(&table, &query)?;
    let closes = clean_closes(&column.cells)?;
    println!(
        "✅ Close column for {} is {}: {} clean values ({} missing)",
        query.instrument(),
        column.key,
        closes.len(),
        column.cells.len() - closes.len()
    );
    if let Some(last) = closes.last() {
        println!("Latest close {:.2}", last);
    }
    Ok(())
}
