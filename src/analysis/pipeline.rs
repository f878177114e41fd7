//! One run: load a table, normalize it, classify the latest closes.

use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::analysis::zone_classifier::{classify, describe};
#[cfg(debug_assertions)]
use crate::config::debug::PRINT_CLASSIFIER_INPUTS;
use crate::data::normalizer::{NormalizeError, normalize};
use crate::data::raw_table::RawTable;
use crate::data::source::{LoadRawTable, load_first_available};
use crate::domain::{BarQuery, Zones};
use crate::models::ClassificationResult;

/// Why a run produced nothing. Every variant leaves the previous artifact alone.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    FetchEmpty,
    InsufficientData { found: usize, required: usize },
    MalformedData { detail: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::FetchEmpty => write!(f, "source returned no rows"),
            SkipReason::InsufficientData { found, required } => write!(
                f,
                "only {} clean closes, {} needed",
                found, required
            ),
            SkipReason::MalformedData { detail } => write!(f, "malformed data: {}", detail),
        }
    }
}

impl From<NormalizeError> for SkipReason {
    fn from(error: NormalizeError) -> Self {
        match error {
            NormalizeError::InsufficientData { found, required } => {
                SkipReason::InsufficientData { found, required }
            }
            NormalizeError::MalformedData(reason) => SkipReason::MalformedData {
                detail: reason.to_string(),
            },
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Classified(ClassificationResult),
    Skipped(SkipReason),
}

impl RunOutcome {
    pub fn is_classified(&self) -> bool {
        matches!(self, RunOutcome::Classified(_))
    }
}

/// Normalize and classify a table that is already in hand. Pure apart from logging.
pub fn evaluate_table(
    table: &RawTable,
    query: &BarQuery,
    zones: &Zones,
    evaluated_at: DateTime<Local>,
) -> RunOutcome {
    if table.is_empty() {
        return RunOutcome::Skipped(SkipReason::FetchEmpty);
    }

    let series = match normalize(table, query) {
        Ok(series) => series,
        Err(e) => return RunOutcome::Skipped(e.into()),
    };

    let triple = series.latest_triple();
    #[cfg(debug_assertions)]
    if PRINT_CLASSIFIER_INPUTS {
        log::info!("{}: {} closes, {}", query.instrument(), series.len(), triple);
    }

    let state = classify(triple, zones);
    RunOutcome::Classified(describe(
        state,
        triple,
        zones,
        query.instrument(),
        evaluated_at,
    ))
}

/// Run once end to end. Skips are a normal outcome; only a source failure is an `Err`.
pub fn run_once(
    sources: &[Box<dyn LoadRawTable>],
    query: &BarQuery,
    zones: &Zones,
) -> Result<RunOutcome> {
    for warning in zones.ordering_warnings() {
        log::warn!("{}: zone ordering: {}", query.instrument(), warning);
    }

    let (table, signature) = load_first_available(sources, query)?;
    log::info!(
        "{}: loaded {} rows via {}",
        query,
        table.row_count(),
        signature
    );

    let outcome = evaluate_table(&table, query, zones, Local::now());
    match &outcome {
        RunOutcome::Classified(result) => log::info!("{}", result),
        RunOutcome::Skipped(reason) => {
            log::warn!("{}: skipped, {}", query.instrument(), reason)
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::InMemoryTable;
    use crate::domain::MarketState;

    const ZONES: Zones = Zones::new(24.0, 24.6, 26.5, 28.0);

    fn query() -> BarQuery {
        BarQuery::from_shorthand("6148.TWO", "5d", "60m").unwrap()
    }

    fn run_table(table: RawTable) -> RunOutcome {
        let sources: Vec<Box<dyn LoadRawTable>> = vec![Box::new(InMemoryTable::new(table))];
        run_once(&sources, &query(), &ZONES).unwrap()
    }

    #[test]
    fn test_scenarios_end_to_end() {
        let cases = [
            ([25.0, 25.0, 23.9], MarketState::Breakdown),
            ([24.7, 24.8, 27.0], MarketState::Holding),
            ([24.7, 24.8, 29.0], MarketState::Breakout),
            ([24.3, 24.4, 24.5], MarketState::Ranging),
            ([30.0, 30.0, 23.0], MarketState::Breakdown),
        ];
        for (closes, expected) in cases {
            match run_table(RawTable::from_closes(&closes)) {
                RunOutcome::Classified(result) => {
                    assert_eq!(result.state, expected, "closes {:?}", closes);
                    assert_eq!(result.price, closes[2]);
                    assert_eq!(result.instrument, "6148.TWO");
                }
                other => panic!("expected a classification for {:?}, got {:?}", closes, other),
            }
        }
    }

    #[test]
    fn test_empty_source_is_fetch_empty() {
        assert_eq!(
            run_table(RawTable::default()),
            RunOutcome::Skipped(SkipReason::FetchEmpty)
        );
    }

    #[test]
    fn test_two_closes_is_insufficient_and_not_classified() {
        let outcome = run_table(RawTable::from_closes(&[25.1, f64::NAN, 25.3]));
        assert!(!outcome.is_classified());
        assert_eq!(
            outcome,
            RunOutcome::Skipped(SkipReason::InsufficientData {
                found: 2,
                required: 3
            })
        );
    }

    #[test]
    fn test_uncoercible_cell_is_malformed() {
        let table =
            RawTable::from_json_str(r#"{"Close": [24.7, "24.8", "suspended", 27.0]}"#).unwrap();
        match run_table(table) {
            RunOutcome::Skipped(SkipReason::MalformedData { detail }) => {
                assert!(detail.contains("row 2"), "{}", detail);
                assert!(detail.contains("suspended"), "{}", detail);
            }
            other => panic!("expected malformed data, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_or_placeholder_text_is_malformed_not_missing() {
        for cell in [r#""""#, r#""none""#, r#""null""#] {
            let json = format!(r#"{{"Close": [24.7, {}, 24.8, 27.0]}}"#, cell);
            let table = RawTable::from_json_str(&json).unwrap();
            match run_table(table) {
                RunOutcome::Skipped(SkipReason::MalformedData { detail }) => {
                    assert!(detail.contains("row 1"), "{}", detail);
                }
                other => panic!("expected malformed data for {}, got {:?}", cell, other),
            }
        }
    }

    #[test]
    fn test_textual_nan_is_dropped_as_missing() {
        let table = RawTable::from_json_str(r#"{"Close": [24.7, "NaN", 24.8, 27.0]}"#).unwrap();
        match run_table(table) {
            RunOutcome::Classified(result) => assert_eq!(result.state, MarketState::Holding),
            other => panic!("expected a classification, got {:?}", other),
        }
    }

    #[test]
    fn test_misordered_zones_still_classify() {
        let zones = Zones::new(24.6, 24.0, 28.0, 26.5);
        let sources: Vec<Box<dyn LoadRawTable>> = vec![Box::new(InMemoryTable::new(
            RawTable::from_closes(&[24.3, 24.4, 24.5]),
        ))];
        let outcome = run_once(&sources, &query(), &zones).unwrap();
        assert!(outcome.is_classified());
    }

    #[test]
    fn test_source_failure_is_an_error_not_a_skip() {
        let sources: Vec<Box<dyn LoadRawTable>> = Vec::new();
        assert!(run_once(&sources, &query(), &ZONES).is_err());
    }

    #[test]
    fn test_outcome_serializes_with_tags() {
        let json = serde_json::to_value(RunOutcome::Skipped(SkipReason::FetchEmpty)).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["reason"], "fetch_empty");

        let outcome = evaluate_table(
            &RawTable::from_closes(&[24.7, 24.8, 29.0]),
            &query(),
            &ZONES,
            Local::now(),
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "classified");
        assert_eq!(json["state"], "BREAKOUT");
        assert_eq!(json["color"], "blue");
    }
}
