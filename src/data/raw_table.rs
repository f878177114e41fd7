//! Wire model for a fetched price table.
//!
//! Upstream dumps arrive in one of two JSON layouts and with column keys that are
//! either flat (`"Close"`) or hierarchical (`["Close", "6148.TWO"]`, or the rendered
//! tuple `"('Close', '6148.TWO')"`). Cells are not guaranteed to be plain numbers.
//! Everything here is shape only: turning cells into prices happens in
//! [`RawCell::to_price`] and nowhere else.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A single table cell exactly as it arrived.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawCell {
    Missing,
    Number(f64),
    Text(String),
    Flag(bool),
    /// Single-element container around a scalar, e.g. `[25.1]`
    Wrapped(Vec<RawCell>),
    /// Typed scalar object, e.g. `{"value": 25.1}`
    Boxed { value: Box<RawCell> },
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellError {
    Unparseable(String),
    EmptyContainer,
    NotScalar(usize),
    UnexpectedType(&'static str),
}

impl std::error::Error for CellError {}
impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CellError::Unparseable(text) => write!(f, "text '{}' is not a number", text),
            CellError::EmptyContainer => write!(f, "empty container where a scalar was expected"),
            CellError::NotScalar(len) => {
                write!(f, "container of {} values where a scalar was expected", len)
            }
            CellError::UnexpectedType(kind) => write!(f, "{} where a number was expected", kind),
        }
    }
}

impl RawCell {
    /// The one place a cell becomes a price.
    ///
    /// `Ok(Some(_))` is a plain float, `Ok(None)` is a missing entry (JSON null, NaN, or
    /// the text `nan` in any case), and `Err` is anything that cannot be read as a
    /// number at all, empty text included.
    /// Wrappers are peeled recursively.
    pub fn to_price(&self) -> Result<Option<f64>, CellError> {
        match self {
            RawCell::Missing => Ok(None),
            RawCell::Number(n) if n.is_nan() => Ok(None),
            RawCell::Number(n) => Ok(Some(*n)),
            RawCell::Text(text) => parse_price_text(text),
            RawCell::Wrapped(items) => match items.as_slice() {
                [inner] => inner.to_price(),
                [] => Err(CellError::EmptyContainer),
                _ => Err(CellError::NotScalar(items.len())),
            },
            RawCell::Boxed { value } => value.to_price(),
            RawCell::Flag(_) => Err(CellError::UnexpectedType("boolean")),
            RawCell::Other(value) => Err(CellError::UnexpectedType(json_kind(value))),
        }
    }
}

fn parse_price_text(text: &str) -> Result<Option<f64>, CellError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_nan() => Ok(None),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(CellError::Unparseable(trimmed.to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Column address: a plain field name, or one entry of a multi-level header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ColumnKey {
    Flat(String),
    Nested(Vec<String>),
}

impl ColumnKey {
    /// Read a column label from a mapping-layout dump, where multi-level headers are
    /// rendered as tuples like `('Close', '6148.TWO')`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Some(inner) => {
                let levels: Vec<String> = inner
                    .split(',')
                    .map(|level| level.trim().trim_matches(|c| c == '\'' || c == '"'))
                    .filter(|level| !level.is_empty())
                    .map(str::to_string)
                    .collect();
                if levels.is_empty() {
                    ColumnKey::Flat(trimmed.to_string())
                } else {
                    ColumnKey::Nested(levels)
                }
            }
            None => ColumnKey::Flat(trimmed.to_string()),
        }
    }

    pub fn levels(&self) -> Vec<&str> {
        match self {
            ColumnKey::Flat(name) => vec![name.as_str()],
            ColumnKey::Nested(levels) => levels.iter().map(String::as_str).collect(),
        }
    }

    pub fn has_level(&self, wanted: &str) -> bool {
        self.levels()
            .iter()
            .any(|level| level.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, ColumnKey::Nested(_))
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnKey::Flat(name) => write!(f, "{}", name),
            ColumnKey::Nested(levels) => write!(f, "({})", levels.iter().join(", ")),
        }
    }
}

/// Row label of a table (epoch milliseconds or a date string).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IndexLabel {
    Epoch(i64),
    Text(String),
    Other(serde_json::Value),
}

impl fmt::Display for IndexLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IndexLabel::Epoch(ms) => write!(f, "{}", ms),
            IndexLabel::Text(text) => write!(f, "{}", text),
            IndexLabel::Other(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub key: ColumnKey,
    pub cells: Vec<RawCell>,
}

/// A fetched table held column-wise, oldest row first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<RawColumn>,
    index: Vec<IndexLabel>,
}

#[derive(Debug)]
pub enum TableShapeError {
    Decode(serde_json::Error),
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

impl std::error::Error for TableShapeError {}
impl fmt::Display for TableShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableShapeError::Decode(e) => write!(f, "table is not in a known layout: {}", e),
            TableShapeError::RaggedRow {
                row,
                found,
                expected,
            } => write!(
                f,
                "row {} has {} cells but the header names {} columns",
                row, found, expected
            ),
        }
    }
}

// The two on-disk layouts. Split is tried first: its `columns`/`data` lists would
// otherwise also read as mapping columns.
#[derive(Deserialize)]
#[serde(untagged)]
enum TableLayout {
    Split(SplitLayout),
    Mapping(BTreeMap<String, ColumnValues>),
}

#[derive(Deserialize)]
struct SplitLayout {
    columns: Vec<ColumnKey>,
    #[serde(default)]
    index: Vec<IndexLabel>,
    data: Vec<Vec<RawCell>>,
}

// Keys that only a split dump carries side by side
const SPLIT_KEYS: [&str; 2] = ["columns", "data"];

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnValues {
    Listed(Vec<RawCell>),
    Keyed(BTreeMap<String, RawCell>),
}

impl RawTable {
    pub fn new(columns: Vec<RawColumn>, index: Vec<IndexLabel>) -> Self {
        Self { columns, index }
    }

    /// Convenience for a single flat `Close` column of plain numbers.
    pub fn from_closes(closes: &[f64]) -> Self {
        Self::new(
            vec![RawColumn {
                key: ColumnKey::Flat("Close".to_string()),
                cells: closes.iter().copied().map(RawCell::Number).collect(),
            }],
            Vec::new(),
        )
    }

    pub fn from_json_str(text: &str) -> Result<Self, TableShapeError> {
        let layout: TableLayout = serde_json::from_str(text).map_err(TableShapeError::Decode)?;
        match layout {
            // A split dump that failed to decode as split must not pass for a mapping
            TableLayout::Mapping(by_label)
                if SPLIT_KEYS.iter().all(|key| by_label.contains_key(*key)) =>
            {
                let split: SplitLayout =
                    serde_json::from_str(text).map_err(TableShapeError::Decode)?;
                Self::from_layout(TableLayout::Split(split))
            }
            layout => Self::from_layout(layout),
        }
    }

    fn from_layout(layout: TableLayout) -> Result<Self, TableShapeError> {
        match layout {
            TableLayout::Split(SplitLayout {
                columns,
                index,
                data,
            }) => {
                let expected = columns.len();
                let mut cells_by_column: Vec<Vec<RawCell>> =
                    vec![Vec::with_capacity(data.len()); expected];
                for (row, cells) in data.into_iter().enumerate() {
                    if cells.len() != expected {
                        return Err(TableShapeError::RaggedRow {
                            row,
                            found: cells.len(),
                            expected,
                        });
                    }
                    for (column, cell) in cells.into_iter().enumerate() {
                        cells_by_column[column].push(cell);
                    }
                }
                let columns = columns
                    .into_iter()
                    .zip(cells_by_column)
                    .map(|(key, cells)| RawColumn { key, cells })
                    .collect();
                Ok(Self::new(columns, index))
            }
            TableLayout::Mapping(by_label) => {
                let mut index = Vec::new();
                let mut columns = Vec::with_capacity(by_label.len());
                for (label, values) in by_label {
                    let cells = match values {
                        ColumnValues::Listed(cells) => cells,
                        ColumnValues::Keyed(keyed) => {
                            let (labels, cells) = order_keyed_cells(keyed);
                            if index.is_empty() {
                                index = labels;
                            }
                            cells
                        }
                    };
                    columns.push(RawColumn {
                        key: ColumnKey::from_label(&label),
                        cells,
                    });
                }
                Ok(Self::new(columns, index))
            }
        }
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    pub fn index(&self) -> &[IndexLabel] {
        &self.index
    }

    pub fn row_count(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.cells.len())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key.to_string()).collect()
    }
}

// Keyed columns come from maps of row label -> cell. Epoch labels must be ordered
// numerically; anything else (ISO dates) is already in order lexicographically.
fn order_keyed_cells(keyed: BTreeMap<String, RawCell>) -> (Vec<IndexLabel>, Vec<RawCell>) {
    let all_epochs: Option<Vec<i64>> = keyed.keys().map(|k| k.trim().parse().ok()).collect();
    match all_epochs {
        Some(epochs) => keyed
            .into_values()
            .zip(epochs)
            .sorted_by_key(|(_, epoch)| *epoch)
            .map(|(cell, epoch)| (IndexLabel::Epoch(epoch), cell))
            .unzip(),
        None => keyed
            .into_iter()
            .map(|(label, cell)| (IndexLabel::Text(label), cell))
            .unzip(),
    }
}
