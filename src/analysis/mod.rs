// Classification and the single-run pipeline
pub mod pipeline;
pub mod zone_classifier;

// Re-export commonly used types
pub use pipeline::{RunOutcome, SkipReason, evaluate_table, run_once};
pub use zone_classifier::{classify, describe};
