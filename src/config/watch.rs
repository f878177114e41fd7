//! Deploy-time parameters for one watched instrument.

use crate::domain::{BarQuery, Zones};

/// Static description of what to watch and where the lines are drawn.
/// Converted into a [`BarQuery`] + [`Zones`] pair at the pipeline boundary so
/// the classification logic never reads globals.
pub struct WatchConfig {
    /// Instrument id as the data vendor spells it
    pub instrument: &'static str,
    /// Lookback window in vendor shorthand
    pub lookback: &'static str,
    /// Bar width in vendor shorthand
    pub interval: &'static str,
    pub zones: Zones,
}

impl WatchConfig {
    pub fn query(&self) -> Result<BarQuery, String> {
        BarQuery::from_shorthand(self.instrument, self.lookback, self.interval)
    }
}

pub const WATCH: WatchConfig = WatchConfig {
    instrument: "6148.TWO",
    lookback: "5d",
    interval: "60m",
    zones: Zones::new(24.0, 24.6, 26.5, 28.0),
};

/// Number of clean closes the classifier needs (prior, previous, current).
pub const MIN_CLOSES_FOR_CLASSIFICATION: usize = 3;
