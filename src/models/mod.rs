// Domain models for zone watching
// These modules contain pure data independent of any I/O

pub mod classification;
pub mod price_series;

// Re-export key types for convenience
pub use classification::ClassificationResult;
pub use price_series::{PriceSeries, PriceTriple};
