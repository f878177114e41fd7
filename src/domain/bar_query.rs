use serde::{Deserialize, Serialize};

use crate::utils::TimeUtils;

/// One request for price bars: which instrument, how far back, and at what bar width.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct BarQuery {
    pub instrument: String,
    pub lookback_ms: i64,
    pub interval_ms: i64,
}

impl BarQuery {
    pub fn new(instrument: impl Into<String>, lookback_ms: i64, interval_ms: i64) -> Self {
        Self {
            instrument: instrument.into(),
            lookback_ms,
            interval_ms,
        }
    }

    /// Build a query from vendor shorthand, e.g. `("6148.TWO", "5d", "60m")`.
    pub fn from_shorthand(instrument: &str, lookback: &str, interval: &str) -> Result<Self, String> {
        Ok(Self::new(
            instrument,
            TimeUtils::parse_shorthand(lookback)?,
            TimeUtils::parse_shorthand(interval)?,
        ))
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    // Instrument ids are matched case-insensitively against table column levels
    pub fn matches_instrument(&self, text: &str) -> bool {
        self.instrument.eq_ignore_ascii_case(text.trim())
    }
}

impl std::fmt::Display for BarQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ({}ms lookback, {} bars)",
            self.instrument,
            self.lookback_ms,
            TimeUtils::interval_to_string(self.interval_ms)
        )
    }
}
