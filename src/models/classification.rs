use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::{MarketState, Zones};
use crate::models::price_series::PriceTriple;
use crate::utils::time_utils::display_clock;

/// Everything the status-page renderer needs, produced fresh on every run.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub instrument: String,
    pub state: MarketState,
    pub label: String,
    pub detail: String,
    /// Latest close (the value shown on the page)
    pub price: f64,
    pub color: String,
    pub triple: PriceTriple,
    // Snapshot of the zones used, res_low included for display
    pub zones: Zones,
    pub evaluated_at: DateTime<Local>,
}

impl ClassificationResult {
    pub fn display_time(&self) -> String {
        display_clock(&self.evaluated_at)
    }
}

impl std::fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} at {:.2}: {} (updated {})",
            self.instrument,
            self.label,
            self.price,
            self.detail,
            self.display_time()
        )
    }
}
