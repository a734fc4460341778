//! Bounded best-first verification of a single state.
//!
//! One run either certifies the start state as solved within its step
//! budget, reports a tightened admissible estimate, or — if the open
//! set is exhausted without either terminal condition firing — returns
//! an inconclusive outcome carrying the max-`f` fallback. Inconclusive
//! results are reportable anomalies, never silent values.
//!
//! # Known gap (preserved)
//!
//! A child already in the open set is not re-checked when offered at a
//! lower cost: only closed handles are reopened on improvement. This
//! mirrors the original correction procedure and is deliberate; with
//! unit edge costs the first path to a node via a lower-`f` parent is
//! already the cheaper one in every case exercised here.
//!
//! # Out-of-sample states
//!
//! Expansion routinely discovers states outside the batch sample. They
//! are interned into a run-local overlay index and read a corrected
//! heuristic of 0 — the conservative admissible default.

use std::collections::HashMap;
use std::hash::Hash;
use std::panic::{catch_unwind, AssertUnwindSafe};

use underbound_kernel::index::{StateHandle, StateIndex};

use crate::contract::SearchEnvironmentV1;
use crate::error::{CorrectionError, EnvironmentStageV1};
use crate::frontier::OpenList;

/// Terminal condition of one bounded verification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerifyOutcomeV1 {
    /// A goal was reached within budget. `cost` is the accumulated path
    /// cost at the goal — the verified cost-to-go from the start state.
    Solved { cost: f64 },
    /// The minimum-`f` open node exceeded `max_step`. `estimate` is
    /// that node's corrected heuristic, the tightening signal fed back
    /// into `h_admissible`.
    BudgetExceeded { estimate: f64 },
    /// The open set was exhausted without solving or exceeding budget.
    /// `best_f` is the maximum `f` observed across all popped nodes.
    Inconclusive { best_f: f64 },
}

/// One verification run's outcome plus its search effort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerificationV1 {
    pub outcome: VerifyOutcomeV1,
    /// Nodes expanded before termination.
    pub expansions: u64,
    /// High-water mark of the open set.
    pub frontier_high_water: u64,
}

/// Run-local handle space: batch handles first, overlay handles after.
///
/// The batch arena is frozen for the round (every verifier of a round
/// reads the same snapshot), so out-of-sample children intern here.
struct ScratchIndex<'a, S> {
    base: &'a StateIndex<S>,
    extra: Vec<S>,
    extra_by_state: HashMap<S, StateHandle>,
}

impl<'a, S: Eq + Hash + Clone> ScratchIndex<'a, S> {
    fn new(base: &'a StateIndex<S>) -> Self {
        Self {
            base,
            extra: Vec::new(),
            extra_by_state: HashMap::new(),
        }
    }

    fn resolve(&mut self, state: S) -> StateHandle {
        if let Some(handle) = self.base.handle_of(&state) {
            return handle;
        }
        if let Some(&handle) = self.extra_by_state.get(&state) {
            return handle;
        }
        #[allow(clippy::cast_possible_truncation)]
        let handle = StateHandle((self.base.len() + self.extra.len()) as u32);
        self.extra.push(state.clone());
        self.extra_by_state.insert(state, handle);
        handle
    }

    fn state(&self, handle: StateHandle) -> &S {
        let index = handle.index();
        if index < self.base.len() {
            self.base.state(handle).expect("batch handle in range")
        } else {
            &self.extra[index - self.base.len()]
        }
    }
}

/// Corrected heuristic for a handle; overlay handles read 0.
fn h_of(h_corrected: &[f64], handle: StateHandle) -> f64 {
    h_corrected.get(handle.index()).copied().unwrap_or(0.0)
}

/// Verify `start` under step budget `max_step`, best-first by
/// `f = g + h_corrected`.
///
/// `h_corrected` is the frozen snapshot for this round, aligned with
/// `index` handles. Tie-breaking on equal `f` is by lowest handle.
///
/// # Errors
///
/// - [`CorrectionError::EnvironmentPanic`] if `expand` or `is_goal`
///   panics (caught; the batch decides how to proceed).
/// - [`CorrectionError::EnvironmentContract`] if an expansion carries a
///   negative or non-finite edge cost.
pub fn verify<E: SearchEnvironmentV1>(
    env: &E,
    index: &StateIndex<E::State>,
    h_corrected: &[f64],
    start: StateHandle,
    max_step: f64,
) -> Result<VerificationV1, CorrectionError> {
    let mut scratch = ScratchIndex::new(index);
    let mut frontier = OpenList::seeded(start, h_of(h_corrected, start));
    let mut best_f = f64::NEG_INFINITY;
    let mut expansions: u64 = 0;

    while let Some((current, g, f)) = frontier.pop_min() {
        let current_state = scratch.state(current).clone();

        let is_goal = catch_unwind(AssertUnwindSafe(|| env.is_goal(&current_state)))
            .map_err(|_| CorrectionError::EnvironmentPanic {
                stage: EnvironmentStageV1::IsGoal,
            })?;
        if is_goal {
            return Ok(VerificationV1 {
                outcome: VerifyOutcomeV1::Solved { cost: g },
                expansions,
                frontier_high_water: frontier.high_water(),
            });
        }

        if f > max_step {
            return Ok(VerificationV1 {
                outcome: VerifyOutcomeV1::BudgetExceeded {
                    estimate: h_of(h_corrected, current),
                },
                expansions,
                frontier_high_water: frontier.high_water(),
            });
        }

        if f > best_f {
            best_f = f;
        }

        let children = catch_unwind(AssertUnwindSafe(|| env.expand(&current_state))).map_err(
            |_| CorrectionError::EnvironmentPanic {
                stage: EnvironmentStageV1::Expand,
            },
        )?;

        for (child, edge_cost) in children {
            if !edge_cost.is_finite() || edge_cost < 0.0 {
                return Err(CorrectionError::EnvironmentContract {
                    detail: format!("expand() returned edge cost {edge_cost}"),
                });
            }
            let child_handle = scratch.resolve(child);
            let child_g = g + edge_cost;
            let child_f = child_g + h_of(h_corrected, child_handle);
            frontier.offer(child_handle, child_g, child_f);
        }

        frontier.close(current, g);
        expansions += 1;
    }

    // Degenerate outcome: nothing left to pop. Report the fallback
    // rather than inventing a value.
    Ok(VerificationV1 {
        outcome: VerifyOutcomeV1::Inconclusive { best_f },
        expansions,
        frontier_high_water: frontier.high_water(),
    })
}
