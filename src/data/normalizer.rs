//! Series normalizer: from a fetched [`RawTable`] to a clean [`PriceSeries`].
//!
//! The table may address the closing price as a flat `Close` column or as one
//! level of a multi-level header (`(Close, ticker)` or `(ticker, Close)`). Cells
//! are coerced through [`RawCell::to_price`]; missing entries are dropped and
//! order is preserved.

use std::fmt;

use itertools::Itertools;

use crate::config::{CLOSE_FIELD, MIN_CLOSES_FOR_CLASSIFICATION};
#[cfg(debug_assertions)]
use crate::config::debug::PRINT_NORMALIZER_DETAILS;
use crate::data::raw_table::{CellError, RawCell, RawColumn, RawTable};
use crate::domain::BarQuery;
use crate::models::PriceSeries;

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// Fewer clean closes than the classifier needs
    InsufficientData { found: usize, required: usize },
    MalformedData(MalformedReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MalformedReason {
    NoCloseColumn { columns: Vec<String> },
    AmbiguousCloseColumn { candidates: Vec<String> },
    BadCell { row: usize, error: CellError },
    MissingValue { position: usize },
}

impl std::error::Error for NormalizeError {}
impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NormalizeError::InsufficientData { found, required } => write!(
                f,
                "insufficient data: {} clean closes, need at least {}",
                found, required
            ),
            NormalizeError::MalformedData(reason) => write!(f, "malformed data: {}", reason),
        }
    }
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MalformedReason::NoCloseColumn { columns } => write!(
                f,
                "no '{}' column among [{}]",
                CLOSE_FIELD,
                columns.iter().join(", ")
            ),
            MalformedReason::AmbiguousCloseColumn { candidates } => write!(
                f,
                "several '{}' columns and none for the requested instrument: [{}]",
                CLOSE_FIELD,
                candidates.iter().join(", ")
            ),
            MalformedReason::BadCell { row, error } => write!(f, "row {}: {}", row, error),
            MalformedReason::MissingValue { position } => {
                write!(f, "missing value at position {}", position)
            }
        }
    }
}

impl From<MalformedReason> for NormalizeError {
    fn from(reason: MalformedReason) -> Self {
        NormalizeError::MalformedData(reason)
    }
}

/// Find the closing-price column for `query`.
///
/// With a single close column it is used as-is, whichever header shape it has.
/// With several (a multi-instrument download) the one naming the instrument wins.
pub fn locate_close_column<'a>(
    table: &'a RawTable,
    query: &BarQuery,
) -> Result<&'a RawColumn, NormalizeError> {
    let candidates: Vec<&RawColumn> = table
        .columns()
        .iter()
        .filter(|column| column.key.has_level(CLOSE_FIELD))
        .collect();

    match candidates.as_slice() {
        [] => Err(NormalizeError::from(MalformedReason::NoCloseColumn {
            columns: table.column_names(),
        })),
        [only] => {
            if only.key.is_nested() && !names_instrument(only, query) {
                log::warn!(
                    "Close column {} does not name {}; using it anyway",
                    only.key,
                    query.instrument()
                );
            }
            Ok(*only)
        }
        many => many
            .iter()
            .filter(|column| names_instrument(column, query))
            .exactly_one()
            .copied()
            .map_err(|_| {
                NormalizeError::from(MalformedReason::AmbiguousCloseColumn {
                    candidates: many.iter().map(|c| c.key.to_string()).collect(),
                })
            }),
    }
}

fn names_instrument(column: &RawColumn, query: &BarQuery) -> bool {
    column
        .key
        .levels()
        .iter()
        .any(|level| query.matches_instrument(level))
}

/// Coerce cells to plain floats, dropping missing entries and keeping order.
pub fn clean_closes<'a>(
    cells: impl IntoIterator<Item = &'a RawCell>,
) -> Result<Vec<f64>, NormalizeError> {
    let mut closes = Vec::new();
    for (row, cell) in cells.into_iter().enumerate() {
        let price = cell
            .to_price()
            .map_err(|error| MalformedReason::BadCell { row, error })?;
        if let Some(price) = price {
            closes.push(price);
        }
    }
    Ok(closes)
}

pub fn normalize(table: &RawTable, query: &BarQuery) -> Result<PriceSeries, NormalizeError> {
    if table.is_empty() {
        return Err(NormalizeError::InsufficientData {
            found: 0,
            required: MIN_CLOSES_FOR_CLASSIFICATION,
        });
    }

    let column = locate_close_column(table, query)?;
    let closes = clean_closes(&column.cells)?;

    #[cfg(debug_assertions)]
    if PRINT_NORMALIZER_DETAILS {
        log::info!(
            "{}: using column {} ({} cells, {} missing dropped)",
            query,
            column.key,
            column.cells.len(),
            column.cells.len() - closes.len()
        );
    }

    PriceSeries::try_from(closes)
}
