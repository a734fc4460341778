//! Typed run errors for the correction loop.
//!
//! `CorrectionError` represents failures that make the whole run
//! unsound: bad inputs, a defective policy, or an environment that
//! breaks its contract. Per-state outcomes (budget exhaustion,
//! inconclusive searches) are expected results, expressed via
//! [`crate::verifier::VerifyOutcomeV1`] and collected into the report
//! — they never take this path unless the run policy is
//! [`AbortRun`](crate::convergence::InconclusivePolicyV1::AbortRun).

use underbound_kernel::error::HeuristicInputError;

/// Environment call site at which a panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentStageV1 {
    /// `expand()` panicked.
    Expand,
    /// `is_goal()` panicked.
    IsGoal,
}

/// Fatal failure of a correction run.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionError {
    /// Input validation failed before any correction step ran.
    Input(HeuristicInputError),
    /// The run policy is malformed (negative margin, zero round cap).
    InvalidPolicy { detail: String },
    /// An environment call panicked; caught and converted rather than
    /// crashing the batch.
    EnvironmentPanic { stage: EnvironmentStageV1 },
    /// The environment returned a malformed expansion.
    EnvironmentContract { detail: String },
    /// A verification exhausted its frontier and the run policy is
    /// `AbortRun`. `handle` is the dense index of the start state.
    VerificationInconclusive { handle: u32, best_f: f64 },
}

impl From<HeuristicInputError> for CorrectionError {
    fn from(err: HeuristicInputError) -> Self {
        Self::Input(err)
    }
}

impl std::fmt::Display for CorrectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "invalid heuristic input: {err}"),
            Self::InvalidPolicy { detail } => write!(f, "invalid correction policy: {detail}"),
            Self::EnvironmentPanic { stage } => {
                let call = match stage {
                    EnvironmentStageV1::Expand => "expand",
                    EnvironmentStageV1::IsGoal => "is_goal",
                };
                write!(f, "environment {call}() panicked during verification")
            }
            Self::EnvironmentContract { detail } => {
                write!(f, "environment contract violation: {detail}")
            }
            Self::VerificationInconclusive { handle, best_f } => {
                write!(
                    f,
                    "verification of s{handle} exhausted its frontier (best f = {best_f}) \
                     and the run policy aborts on inconclusive results"
                )
            }
        }
    }
}

impl std::error::Error for CorrectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            _ => None,
        }
    }
}
