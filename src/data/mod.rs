// Table decoding, normalization, and sources
pub mod normalizer;
pub mod raw_table;
pub mod source;

// Re-export commonly used types
pub use normalizer::{NormalizeError, normalize};
pub use raw_table::{ColumnKey, RawCell, RawTable};
pub use source::{InMemoryTable, JsonTableFile, LoadRawTable, load_first_available};
