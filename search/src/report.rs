//! Convergence report: the run's audit artifact.
//!
//! The engine carries no logger; what happened during a run is captured
//! here and rendered as deterministic JSON (`serde_json` maps are
//! `BTreeMap`-backed, so keys serialize sorted).

use crate::verifier::VerificationV1;

/// Why the correction loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceTerminationV1 {
    /// Every handle ended solved or (under `MarkDegenerate`) degenerate.
    AllSettled,
    /// The round cap fired with unsettled handles remaining.
    RoundCapReached,
}

/// A verification that exhausted its frontier.
///
/// Anomalies are collected, not swallowed: the batch completes, and the
/// caller decides what a degenerate state means downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyV1 {
    /// Round in which the anomaly occurred (0-based).
    pub round: u32,
    /// Dense handle of the start state.
    pub handle: u32,
    /// Max `f` observed before the frontier emptied.
    pub best_f: f64,
}

/// Aggregate counters for one verification round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummaryV1 {
    /// Round number (0-based).
    pub round: u32,
    /// Handles solved after this round.
    pub solved: usize,
    /// Handles marked degenerate after this round.
    pub degenerate: usize,
    /// Total nodes expanded across all verifications of the round.
    pub expansions: u64,
    /// Largest single-run frontier high water of the round.
    pub frontier_high_water: u64,
}

/// Full audit artifact for one correction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceReportV1 {
    /// Number of distinct states in the batch.
    pub state_count: usize,
    /// One summary per executed round.
    pub rounds: Vec<RoundSummaryV1>,
    /// Inconclusive verifications, in `(round, handle)` order.
    pub anomalies: Vec<AnomalyV1>,
    /// Why the loop stopped.
    pub termination: ConvergenceTerminationV1,
}

impl ConvergenceReportV1 {
    /// Render the report as a JSON value with sorted keys.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let rounds: Vec<serde_json::Value> = self
            .rounds
            .iter()
            .map(|r| {
                serde_json::json!({
                    "round": r.round,
                    "solved": r.solved,
                    "degenerate": r.degenerate,
                    "expansions": r.expansions,
                    "frontier_high_water": r.frontier_high_water,
                })
            })
            .collect();
        let anomalies: Vec<serde_json::Value> = self
            .anomalies
            .iter()
            .map(|a| {
                serde_json::json!({
                    "round": a.round,
                    "handle": a.handle,
                    "best_f": a.best_f,
                })
            })
            .collect();
        let termination = match self.termination {
            ConvergenceTerminationV1::AllSettled => "all_settled",
            ConvergenceTerminationV1::RoundCapReached => "round_cap_reached",
        };
        serde_json::json!({
            "state_count": self.state_count,
            "rounds": rounds,
            "anomalies": anomalies,
            "termination": termination,
        })
    }
}

/// Summarize one round's verifications into a [`RoundSummaryV1`].
#[must_use]
pub fn summarize_round(
    round: u32,
    solved: usize,
    degenerate: usize,
    runs: &[VerificationV1],
) -> RoundSummaryV1 {
    let expansions = runs.iter().map(|r| r.expansions).sum();
    let frontier_high_water = runs.iter().map(|r| r.frontier_high_water).max().unwrap_or(0);
    RoundSummaryV1 {
        round,
        solved,
        degenerate,
        expansions,
        frontier_high_water,
    }
}
