//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. All of these are further gated by `cfg(debug_assertions)`.

/// Emit which column the normalizer picked and how many cells it dropped.
pub const PRINT_NORMALIZER_DETAILS: bool = false;

/// Emit the (prior, previous, current) triple before classification.
pub const PRINT_CLASSIFIER_INPUTS: bool = true;

/// Emit each table source attempted and why it failed.
pub const PRINT_SOURCE_ATTEMPTS: bool = false;
