use serde::{Deserialize, Serialize};

use crate::config::MIN_CLOSES_FOR_CLASSIFICATION;
use crate::data::normalizer::{MalformedReason, NormalizeError};

// ============================================================================
// PriceSeries: clean closes for one instrument, oldest first
// ============================================================================

/// Only constructed through `TryFrom<Vec<f64>>`, which guarantees no NaN entries
/// and at least enough closes to classify.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    closes: Vec<f64>,
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = NormalizeError;

    fn try_from(closes: Vec<f64>) -> Result<Self, Self::Error> {
        if let Some(position) = closes.iter().position(|c| c.is_nan()) {
            return Err(MalformedReason::MissingValue { position }.into());
        }
        if closes.len() < MIN_CLOSES_FOR_CLASSIFICATION {
            return Err(NormalizeError::InsufficientData {
                found: closes.len(),
                required: MIN_CLOSES_FOR_CLASSIFICATION,
            });
        }
        Ok(Self { closes })
    }
}

impl PriceSeries {
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// The last three closes in temporal order.
    pub fn latest_triple(&self) -> PriceTriple {
        let n = self.closes.len();
        debug_assert!(n >= MIN_CLOSES_FOR_CLASSIFICATION);
        PriceTriple::new(self.closes[n - 3], self.closes[n - 2], self.closes[n - 1])
    }
}

// ============================================================================
// PriceTriple: the classifier's input
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PriceTriple {
    /// Two bars back
    pub prior: f64,
    pub previous: f64,
    pub current: f64,
}

impl PriceTriple {
    pub const fn new(prior: f64, previous: f64, current: f64) -> Self {
        Self {
            prior,
            previous,
            current,
        }
    }
}

impl std::fmt::Display for PriceTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "prior {:.2} -> previous {:.2} -> current {:.2}",
            self.prior, self.previous, self.current
        )
    }
}
