//! Handle-aligned heuristic columns for one correction run.

use crate::error::HeuristicInputError;
use crate::index::StateHandle;

/// Per-handle heuristic columns, created once per run and mutated in
/// place by the corrector and the verifier round.
///
/// Columns are aligned with handle assignment order:
///
/// - `h_raw` -- externally supplied estimate, immutable for the batch
/// - `h_corrected` -- refreshed by every corrector pass
/// - `h_admissible` -- candidate lower bound, tightened by verification
/// - `solved` -- bounded verification reached a goal within budget
/// - `degenerate` -- verification was inconclusive and the run policy
///   marked the state as such
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicTable {
    h_raw: Vec<f64>,
    /// Corrected heuristic, `h'` in the correction literature.
    pub h_corrected: Vec<f64>,
    /// Admissible candidate, `h_a`. Initialized to 0.0 (conservative).
    pub h_admissible: Vec<f64>,
    /// Verified-within-budget flag per handle.
    pub solved: Vec<bool>,
    /// Inconclusive-verification flag per handle.
    pub degenerate: Vec<bool>,
}

impl HeuristicTable {
    /// Build a table from the raw heuristic vector.
    ///
    /// `state_count` is the number of distinct interned states; it must
    /// match `h_raw.len()` because columns are handle-aligned.
    ///
    /// # Errors
    ///
    /// Returns [`HeuristicInputError`] on an empty sample, a length
    /// mismatch, or a negative / non-finite raw entry. All are fatal
    /// for the run.
    pub fn new(state_count: usize, h_raw: Vec<f64>) -> Result<Self, HeuristicInputError> {
        if state_count == 0 {
            return Err(HeuristicInputError::EmptySample);
        }
        if state_count != h_raw.len() {
            return Err(HeuristicInputError::LengthMismatch {
                states: state_count,
                heuristics: h_raw.len(),
            });
        }
        for (index, &value) in h_raw.iter().enumerate() {
            if !value.is_finite() {
                return Err(HeuristicInputError::NonFiniteEntry { index, value });
            }
            if value < 0.0 {
                return Err(HeuristicInputError::NegativeEntry { index, value });
            }
        }

        let n = h_raw.len();
        Ok(Self {
            h_corrected: h_raw.clone(),
            h_raw,
            h_admissible: vec![0.0; n],
            solved: vec![false; n],
            degenerate: vec![false; n],
        })
    }

    /// The immutable raw heuristic column.
    #[must_use]
    pub fn h_raw(&self) -> &[f64] {
        &self.h_raw
    }

    /// Number of handles in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.h_raw.len()
    }

    /// Whether the table is empty (never true for a validated table).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.h_raw.is_empty()
    }

    /// Whether every handle is either solved or marked degenerate.
    ///
    /// This is the convergence condition of the correction loop.
    #[must_use]
    pub fn all_settled(&self) -> bool {
        self.solved
            .iter()
            .zip(self.degenerate.iter())
            .all(|(&s, &d)| s || d)
    }

    /// Step budget for verifying `handle`: `h_admissible + eta`.
    #[must_use]
    pub fn max_step(&self, handle: StateHandle, eta: f64) -> f64 {
        self.h_admissible[handle.index()] + eta
    }
}
