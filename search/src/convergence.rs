//! The correction loop: iterated bucket correction plus bounded
//! verification, run to convergence or a round cap.
//!
//! Each round refreshes `h_corrected` (a barrier: every verifier of the
//! round reads the same frozen snapshot), verifies every handle
//! independently, then folds the outcomes back into the table. A
//! failure inside one state's verification never silently skips the
//! rest of the round: environment panics and contract violations abort
//! the run with a typed error, while inconclusive searches are recorded
//! per the run policy and the batch continues.

use rayon::prelude::*;

use underbound_kernel::bucket;
use underbound_kernel::index::{StateHandle, StateIndex};
use underbound_kernel::table::HeuristicTable;

use crate::contract::SearchEnvironmentV1;
use crate::error::CorrectionError;
use crate::report::{summarize_round, AnomalyV1, ConvergenceReportV1, ConvergenceTerminationV1};
use crate::verifier::{verify, VerificationV1, VerifyOutcomeV1};

/// What to do when a verification exhausts its frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconclusivePolicyV1 {
    /// Record the anomaly, mark the handle degenerate, and keep going.
    /// Degenerate handles no longer block convergence. Default.
    MarkDegenerate,
    /// Abort the run with
    /// [`CorrectionError::VerificationInconclusive`].
    AbortRun,
}

/// Margins, round cap, and execution mode for one correction run.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionPolicyV1 {
    /// Back-off margin `b` subtracted from each bucket's measured
    /// violation before correcting.
    pub backoff_margin: f64,
    /// Step-budget margin: each verification runs under
    /// `h_admissible + eta`.
    pub eta: f64,
    /// Hard cap on correction rounds.
    pub max_rounds: u32,
    /// Policy for inconclusive verifications.
    pub inconclusive: InconclusivePolicyV1,
    /// Distribute each round's verifications across the rayon worker
    /// pool. Results are identical either way; rounds are
    /// embarrassingly parallel because every run reads only the frozen
    /// snapshot and owns its own frontier.
    pub parallel: bool,
}

impl Default for CorrectionPolicyV1 {
    fn default() -> Self {
        Self {
            backoff_margin: 3.0,
            eta: 5.0,
            max_rounds: 50,
            inconclusive: InconclusivePolicyV1::MarkDegenerate,
            parallel: true,
        }
    }
}

impl CorrectionPolicyV1 {
    /// Validate margins and the round cap.
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::InvalidPolicy`] for a negative or
    /// non-finite margin, or a zero round cap.
    pub fn validate(&self) -> Result<(), CorrectionError> {
        if !self.backoff_margin.is_finite() || self.backoff_margin < 0.0 {
            return Err(CorrectionError::InvalidPolicy {
                detail: format!("backoff_margin must be finite and >= 0, got {}", self.backoff_margin),
            });
        }
        if !self.eta.is_finite() || self.eta < 0.0 {
            return Err(CorrectionError::InvalidPolicy {
                detail: format!("eta must be finite and >= 0, got {}", self.eta),
            });
        }
        if self.max_rounds == 0 {
            return Err(CorrectionError::InvalidPolicy {
                detail: "max_rounds must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Final vectors of a correction run, aligned to the input state order,
/// plus the audit report.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionOutcomeV1 {
    /// Corrected heuristic; `h_corrected[i] <= h_raw[i]` for every `i`.
    pub h_corrected: Vec<f64>,
    /// Final admissible candidates.
    pub h_admissible: Vec<f64>,
    /// Verified-within-budget flags.
    pub solved: Vec<bool>,
    /// The run's audit artifact.
    pub report: ConvergenceReportV1,
}

/// Run the correction loop over a state sample and its raw heuristic.
///
/// `states` and `h_raw` are aligned index-for-index; outputs are
/// aligned to the same order. Duplicate states intern to one handle and
/// share the first occurrence's raw value.
///
/// # Errors
///
/// - [`CorrectionError::Input`] for an empty sample, a length mismatch,
///   or a negative / non-finite raw entry.
/// - [`CorrectionError::InvalidPolicy`] for a malformed policy.
/// - [`CorrectionError::EnvironmentPanic`] /
///   [`CorrectionError::EnvironmentContract`] when the environment
///   breaks its contract; the run cannot proceed safely.
/// - [`CorrectionError::VerificationInconclusive`] only under
///   [`InconclusivePolicyV1::AbortRun`].
pub fn converge<E: SearchEnvironmentV1>(
    env: &E,
    states: &[E::State],
    h_raw: &[f64],
    policy: &CorrectionPolicyV1,
) -> Result<CorrectionOutcomeV1, CorrectionError> {
    policy.validate()?;
    if states.len() != h_raw.len() {
        return Err(underbound_kernel::error::HeuristicInputError::LengthMismatch {
            states: states.len(),
            heuristics: h_raw.len(),
        }
        .into());
    }

    // Intern the batch; duplicates collapse to their first handle.
    let mut index = StateIndex::new();
    let mut input_handles = Vec::with_capacity(states.len());
    let mut dense_raw: Vec<f64> = Vec::new();
    for (state, &raw) in states.iter().zip(h_raw.iter()) {
        let handle = index.intern(state.clone());
        if handle.index() == dense_raw.len() {
            dense_raw.push(raw);
        }
        input_handles.push(handle);
    }

    let mut table = HeuristicTable::new(index.len(), dense_raw)?;
    let mut rounds = Vec::new();
    let mut anomalies: Vec<AnomalyV1> = Vec::new();
    let mut round: u32 = 0;

    let termination = loop {
        // Barrier: refresh the snapshot before any verifier runs.
        table.h_corrected =
            bucket::correct(table.h_raw(), &table.h_admissible, policy.backoff_margin);

        let runs = run_round(env, &index, &table, policy)?;

        for (i, run) in runs.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let handle = StateHandle(i as u32);
            match run.outcome {
                VerifyOutcomeV1::Solved { cost } => {
                    table.h_admissible[i] = cost;
                    table.solved[i] = true;
                }
                VerifyOutcomeV1::BudgetExceeded { estimate } => {
                    table.h_admissible[i] = estimate;
                    table.solved[i] = false;
                }
                VerifyOutcomeV1::Inconclusive { best_f } => match policy.inconclusive {
                    InconclusivePolicyV1::MarkDegenerate => {
                        table.solved[i] = false;
                        table.degenerate[i] = true;
                        anomalies.push(AnomalyV1 {
                            round,
                            handle: handle.0,
                            best_f,
                        });
                    }
                    InconclusivePolicyV1::AbortRun => {
                        return Err(CorrectionError::VerificationInconclusive {
                            handle: handle.0,
                            best_f,
                        });
                    }
                },
            }
        }

        let solved = table.solved.iter().filter(|&&s| s).count();
        let degenerate = table.degenerate.iter().filter(|&&d| d).count();
        rounds.push(summarize_round(round, solved, degenerate, &runs));
        round += 1;

        if table.all_settled() {
            break ConvergenceTerminationV1::AllSettled;
        }
        if round >= policy.max_rounds {
            break ConvergenceTerminationV1::RoundCapReached;
        }
    };

    // Final pass so the returned heuristic reflects the final
    // admissible estimates.
    table.h_corrected = bucket::correct(table.h_raw(), &table.h_admissible, policy.backoff_margin);

    let report = ConvergenceReportV1 {
        state_count: index.len(),
        rounds,
        anomalies,
        termination,
    };

    Ok(CorrectionOutcomeV1 {
        h_corrected: input_handles
            .iter()
            .map(|h| table.h_corrected[h.index()])
            .collect(),
        h_admissible: input_handles
            .iter()
            .map(|h| table.h_admissible[h.index()])
            .collect(),
        solved: input_handles.iter().map(|h| table.solved[h.index()]).collect(),
        report,
    })
}

/// Verify every handle against the current snapshot.
///
/// Runs on the rayon pool when the policy asks for it; the serial path
/// produces byte-identical results and exists for debugging and for
/// single-threaded callers.
fn run_round<E: SearchEnvironmentV1>(
    env: &E,
    index: &StateIndex<E::State>,
    table: &HeuristicTable,
    policy: &CorrectionPolicyV1,
) -> Result<Vec<VerificationV1>, CorrectionError> {
    let snapshot = &table.h_corrected;
    let verify_one = |i: usize| {
        #[allow(clippy::cast_possible_truncation)]
        let handle = StateHandle(i as u32);
        verify(
            env,
            index,
            snapshot,
            handle,
            table.max_step(handle, policy.eta),
        )
    };

    if policy.parallel {
        (0..table.len())
            .into_par_iter()
            .map(verify_one)
            .collect::<Result<Vec<_>, _>>()
    } else {
        (0..table.len()).map(verify_one).collect()
    }
}
