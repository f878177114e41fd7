use serde::{Deserialize, Serialize};

/// The four price thresholds a watched instrument is classified against.
///
/// Expected ordering is `sup_low < sup_high` and `res_low < res_high`. That is
/// not enforced: zones are deploy-time configuration and a misordered set still
/// classifies, it just gets reported through [`Zones::ordering_warnings`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Zones {
    /// Structural floor. Closing below it is a breakdown.
    pub sup_low: f64,
    /// Short-term pivot. Two closes above it confirm strength.
    pub sup_high: f64,
    /// Partial resistance. Carried for display only, never part of the decision.
    pub res_low: f64,
    /// Breakout level.
    pub res_high: f64,
}

impl Zones {
    pub const fn new(sup_low: f64, sup_high: f64, res_low: f64, res_high: f64) -> Self {
        Self {
            sup_low,
            sup_high,
            res_low,
            res_high,
        }
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN thresholds must also warn
    pub fn ordering_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !(self.sup_low < self.sup_high) {
            warnings.push(format!(
                "sup_low ({}) is not below sup_high ({})",
                self.sup_low, self.sup_high
            ));
        }
        if !(self.res_low < self.res_high) {
            warnings.push(format!(
                "res_low ({}) is not below res_high ({})",
                self.res_low, self.res_high
            ));
        }
        warnings
    }
}

impl std::fmt::Display for Zones {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "support {:.2}/{:.2}, resistance {:.2}/{:.2}",
            self.sup_low, self.sup_high, self.res_low, self.res_high
        )
    }
}
