//! Configuration module for the zone watcher.

pub mod debug;
pub mod persistence;
pub mod watch;

// Re-export commonly used items
pub use persistence::{CLOSE_FIELD, DEFAULT_TABLE_PATH};
pub use watch::{MIN_CLOSES_FOR_CLASSIFICATION, WATCH, WatchConfig};
