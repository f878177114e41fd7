//! File locations for table dumps and zone overrides

/// Default location of the most recent price-table dump
pub const DEFAULT_TABLE_PATH: &str = "price_table.json";

/// Field name the normalizer looks for when locating the closing-price column
pub const CLOSE_FIELD: &str = "Close";
