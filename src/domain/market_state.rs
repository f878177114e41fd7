use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the latest close sits relative to the configured zones.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketState {
    Breakdown, // Closed below the structural floor
    Holding,   // Two bars above the pivot, still under the breakout level
    Breakout,  // Two bars above the pivot, at or through the breakout level
    Ranging,
}

impl MarketState {
    pub fn label(&self) -> &'static str {
        match self {
            MarketState::Breakdown => "⚠️ Breakdown",
            MarketState::Holding => "✅ Holding",
            MarketState::Breakout => "🚀 Breakout",
            MarketState::Ranging => "🔎 Watching",
        }
    }

    /// Colour tag handed to the renderer.
    pub fn color(&self) -> &'static str {
        match self {
            MarketState::Breakdown => "red",
            MarketState::Holding => "green",
            MarketState::Breakout => "blue",
            MarketState::Ranging => "orange",
        }
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarketState::Breakdown => write!(f, "BREAKDOWN"),
            MarketState::Holding => write!(f, "HOLDING"),
            MarketState::Breakout => write!(f, "BREAKOUT"),
            MarketState::Ranging => write!(f, "RANGING"),
        }
    }
}
