//! Typed input errors for the correction core.
//!
//! `HeuristicInputError` covers pre-flight validation only. Per-state
//! verification outcomes (budget exhaustion, inconclusive searches) are
//! not errors; they are expressed as outcome variants in
//! `underbound-search` and never abort the batch.

/// Fatal validation failure for a correction run's inputs.
///
/// These errors are returned before any correction or verification step
/// executes. The run cannot proceed safely, so no partial result is
/// produced.
#[derive(Debug, Clone, PartialEq)]
pub enum HeuristicInputError {
    /// The state sample was empty; at least one state is required.
    EmptySample,
    /// `states` and `h_raw` are not aligned index-for-index.
    LengthMismatch { states: usize, heuristics: usize },
    /// A raw heuristic entry was negative.
    NegativeEntry { index: usize, value: f64 },
    /// A raw heuristic entry was NaN or infinite.
    NonFiniteEntry { index: usize, value: f64 },
}

impl std::fmt::Display for HeuristicInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySample => {
                write!(f, "state sample is empty; at least one state is required")
            }
            Self::LengthMismatch { states, heuristics } => {
                write!(
                    f,
                    "states/h_raw length mismatch: {states} states, {heuristics} heuristic entries"
                )
            }
            Self::NegativeEntry { index, value } => {
                write!(f, "h_raw[{index}] = {value} is negative")
            }
            Self::NonFiniteEntry { index, value } => {
                write!(f, "h_raw[{index}] = {value} is not finite")
            }
        }
    }
}

impl std::error::Error for HeuristicInputError {}
