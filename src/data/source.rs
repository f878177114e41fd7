//! Where raw tables come from.
//!
//! Fetching from the data vendor is someone else's job; this module only defines the
//! seam and the sources that read what has already been fetched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_SOURCE_ATTEMPTS;
use crate::data::raw_table::RawTable;
use crate::domain::BarQuery;

pub trait LoadRawTable {
    // Either produce a table for the query OR return an anyhow::Error
    fn load_raw_table(&self, query: &BarQuery) -> Result<RawTable>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each source in order and return the first table produced, with the signature
/// of the source that produced it.
pub fn load_first_available(
    sources: &[Box<dyn LoadRawTable>],
    query: &BarQuery,
) -> Result<(RawTable, &'static str)> {
    for source in sources {
        match source.load_raw_table(query) {
            Ok(table) => return Ok((table, source.signature())),
            Err(e) => {
                log::info!("{} could not load {}: {:#}", source.signature(), query, e);
                #[cfg(debug_assertions)]
                if PRINT_SOURCE_ATTEMPTS {
                    log::info!("Moving on to the next source");
                }
            }
        }
    }
    Err(anyhow!("All table sources failed for {}", query))
}

/// A table dump on disk. The path may contain `{instrument}`, which is replaced by
/// the query's instrument id so one source can serve several watches.
pub struct JsonTableFile {
    path_template: String,
}

impl JsonTableFile {
    pub fn new(path_template: impl Into<String>) -> Self {
        Self {
            path_template: path_template.into(),
        }
    }

    pub fn path_for(&self, query: &BarQuery) -> PathBuf {
        PathBuf::from(
            self.path_template
                .replace("{instrument}", query.instrument()),
        )
    }
}

pub fn read_table_file(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read table dump: {}", path.display()))?;
    RawTable::from_json_str(&text)
        .with_context(|| format!("Failed to decode table dump: {}", path.display()))
}

impl LoadRawTable for JsonTableFile {
    fn signature(&self) -> &'static str {
        "JSON table file"
    }

    fn load_raw_table(&self, query: &BarQuery) -> Result<RawTable> {
        read_table_file(&self.path_for(query))
    }
}

/// A table already in memory (tests, or callers that fetched it themselves).
pub struct InMemoryTable {
    table: RawTable,
}

impl InMemoryTable {
    pub fn new(table: RawTable) -> Self {
        Self { table }
    }
}

impl LoadRawTable for InMemoryTable {
    fn signature(&self) -> &'static str {
        "In-memory table"
    }

    fn load_raw_table(&self, _query: &BarQuery) -> Result<RawTable> {
        Ok(self.table.clone())
    }
}
