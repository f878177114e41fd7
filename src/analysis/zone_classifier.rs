use chrono::{DateTime, Local};

use crate::domain::{MarketState, Zones};
use crate::models::{ClassificationResult, PriceTriple};

/// Decide the market state for the latest three closes.
///
/// Rules are checked top to bottom and the first match wins:
/// 1. `current < sup_low` is a breakdown, whatever the earlier bars did.
/// 2. Two confirming bars above `sup_high` and `current < res_high` is holding.
/// 3. The same confirmation with `current >= res_high` is a breakout.
/// 4. Anything else is ranging.
///
/// `res_low` takes no part in the decision.
pub fn classify(triple: PriceTriple, zones: &Zones) -> MarketState {
    let PriceTriple {
        prior,
        previous,
        current,
    } = triple;

    if current < zones.sup_low {
        return MarketState::Breakdown;
    }

    let confirmed_above_pivot = prior > zones.sup_high && previous > zones.sup_high;
    if confirmed_above_pivot {
        if current < zones.res_high {
            MarketState::Holding
        } else {
            MarketState::Breakout
        }
    } else {
        MarketState::Ranging
    }
}

pub fn detail_for(state: MarketState, zones: &Zones) -> String {
    match state {
        MarketState::Breakdown => format!("Broke below {:.2}", zones.sup_low),
        MarketState::Holding => format!("Holding above {:.2}", zones.sup_high),
        MarketState::Breakout => format!("Broke through {:.2}", zones.res_high),
        MarketState::Ranging => "Ranging between zones".to_string(),
    }
}

/// Attach presentation (label, detail, colour) to a decided state.
/// `evaluated_at` is display-only and never feeds the decision.
pub fn describe(
    state: MarketState,
    triple: PriceTriple,
    zones: &Zones,
    instrument: &str,
    evaluated_at: DateTime<Local>,
) -> ClassificationResult {
    ClassificationResult {
        instrument: instrument.to_string(),
        state,
        label: state.label().to_string(),
        detail: detail_for(state, zones),
        price: triple.current,
        color: state.color().to_string(),
        triple,
        zones: *zones,
        evaluated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceSeries;
    use chrono::TimeZone;

    const ZONES: Zones = Zones::new(24.0, 24.6, 26.5, 28.0);

    fn classify_closes(closes: &[f64]) -> MarketState {
        let series = PriceSeries::try_from(closes.to_vec()).unwrap();
        classify(series.latest_triple(), &ZONES)
    }

    #[test]
    fn test_breakdown_below_floor() {
        assert_eq!(classify_closes(&[25.0, 25.0, 23.9]), MarketState::Breakdown);
    }

    #[test]
    fn test_holding_after_two_confirming_bars() {
        assert_eq!(classify_closes(&[24.7, 24.8, 27.0]), MarketState::Holding);
    }

    #[test]
    fn test_breakout_through_resistance() {
        assert_eq!(classify_closes(&[24.7, 24.8, 29.0]), MarketState::Breakout);
    }

    #[test]
    fn test_ranging_without_confirmation() {
        assert_eq!(classify_closes(&[24.3, 24.4, 24.5]), MarketState::Ranging);
    }

    #[test]
    fn test_breakdown_overrides_confirmation() {
        assert_eq!(classify_closes(&[30.0, 30.0, 23.0]), MarketState::Breakdown);
    }

    #[test]
    fn test_only_the_last_three_closes_matter() {
        assert_eq!(
            classify_closes(&[10.0, 50.0, 24.7, 24.8, 29.0]),
            MarketState::Breakout
        );
    }

    #[test]
    fn test_boundaries() {
        // Floor is strict
        assert_eq!(
            classify(PriceTriple::new(24.3, 24.3, 24.0), &ZONES),
            MarketState::Ranging
        );
        // Breakout level is inclusive
        assert_eq!(
            classify(PriceTriple::new(24.7, 24.8, 28.0), &ZONES),
            MarketState::Breakout
        );
        // Confirmation needs strictly above the pivot on both bars
        assert_eq!(
            classify(PriceTriple::new(24.6, 24.8, 27.0), &ZONES),
            MarketState::Ranging
        );
        assert_eq!(
            classify(PriceTriple::new(24.8, 24.6, 27.0), &ZONES),
            MarketState::Ranging
        );
    }

    #[test]
    fn test_res_low_never_changes_the_decision() {
        let triples = [
            PriceTriple::new(25.0, 25.0, 23.9),
            PriceTriple::new(24.7, 24.8, 27.0),
            PriceTriple::new(24.7, 24.8, 29.0),
            PriceTriple::new(24.3, 24.4, 24.5),
        ];
        for res_low in [0.0, 26.5, 27.5, 100.0] {
            let zones = Zones { res_low, ..ZONES };
            for triple in triples {
                assert_eq!(classify(triple, &zones), classify(triple, &ZONES));
            }
        }
    }

    #[test]
    fn test_exactly_one_state_over_a_price_grid() {
        // Sweep prices across and around every threshold; classification must
        // always land on a state and agree with the written rules.
        let grid: Vec<f64> = (0..=80).map(|i| 22.0 + i as f64 * 0.1).collect();
        for &prior in &grid {
            for &previous in &grid {
                for &current in &grid {
                    let state = classify(PriceTriple::new(prior, previous, current), &ZONES);
                    let confirmed = prior > ZONES.sup_high && previous > ZONES.sup_high;
                    let expected = if current < ZONES.sup_low {
                        MarketState::Breakdown
                    } else if confirmed && current < ZONES.res_high {
                        MarketState::Holding
                    } else if confirmed {
                        MarketState::Breakout
                    } else {
                        MarketState::Ranging
                    };
                    assert_eq!(state, expected);
                }
            }
        }
    }

    #[test]
    fn test_describe_attaches_presentation() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap();
        let triple = PriceTriple::new(25.0, 25.0, 23.9);
        let result = describe(MarketState::Breakdown, triple, &ZONES, "6148.TWO", at);

        assert_eq!(result.label, "⚠️ Breakdown");
        assert_eq!(result.detail, "Broke below 24.00");
        assert_eq!(result.color, "red");
        assert_eq!(result.price, 23.9);
        assert_eq!(result.zones.res_low, 26.5);
        assert_eq!(result.display_time(), "13:30:00");
    }

    #[test]
    fn test_detail_strings() {
        assert_eq!(
            detail_for(MarketState::Holding, &ZONES),
            "Holding above 24.60"
        );
        assert_eq!(
            detail_for(MarketState::Breakout, &ZONES),
            "Broke through 28.00"
        );
        assert_eq!(
            detail_for(MarketState::Ranging, &ZONES),
            "Ranging between zones"
        );
    }
}
