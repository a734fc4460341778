//! Correction runner: executes a run and persists its report artifact.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → converge() → render report JSON
//!   → (optionally) write report.json into an artifact directory
//! ```
//!
//! The runner owns orchestration and persistence only; correction and
//! verification semantics live in `underbound_search`.

use std::io::Write;
use std::path::{Path, PathBuf};

use underbound_search::contract::SearchEnvironmentV1;
use underbound_search::convergence::{converge, CorrectionOutcomeV1, CorrectionPolicyV1};
use underbound_search::error::CorrectionError;

use crate::provider::HeuristicSourceV1;

/// File name of the report artifact inside a run directory.
pub const REPORT_FILE_NAME: &str = "report.json";

/// Error during a runner invocation.
#[derive(Debug)]
pub enum RunError {
    /// The correction run itself failed.
    Correction(CorrectionError),
    /// Writing the report artifact failed.
    ReportWrite { path: PathBuf, detail: String },
}

impl From<CorrectionError> for RunError {
    fn from(err: CorrectionError) -> Self {
        Self::Correction(err)
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correction(err) => write!(f, "correction run failed: {err}"),
            Self::ReportWrite { path, detail } => {
                write!(f, "failed to write report to {}: {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Correction(err) => Some(err),
            Self::ReportWrite { .. } => None,
        }
    }
}

/// Run a correction over an explicit raw-heuristic vector.
///
/// Thin wrapper over [`converge`] so callers hold one entry point.
///
/// # Errors
///
/// Propagates every [`CorrectionError`] as [`RunError::Correction`].
pub fn run_correction<E: SearchEnvironmentV1>(
    env: &E,
    states: &[E::State],
    h_raw: &[f64],
    policy: &CorrectionPolicyV1,
) -> Result<CorrectionOutcomeV1, RunError> {
    Ok(converge(env, states, h_raw, policy)?)
}

/// Run a correction, sourcing the raw heuristic from a provider.
///
/// # Errors
///
/// Propagates every [`CorrectionError`] as [`RunError::Correction`].
pub fn run_with_source<E, H>(
    env: &E,
    states: &[E::State],
    source: &H,
    policy: &CorrectionPolicyV1,
) -> Result<CorrectionOutcomeV1, RunError>
where
    E: SearchEnvironmentV1,
    H: HeuristicSourceV1<E::State>,
{
    let h_raw = source.estimate_batch(states);
    run_correction(env, states, &h_raw, policy)
}

/// Write the run's report artifact into `dir` as `report.json`.
///
/// The rendered JSON is deterministic (sorted keys), so identical runs
/// produce byte-identical artifacts.
///
/// # Errors
///
/// Returns [`RunError::ReportWrite`] on any filesystem failure.
pub fn write_report(outcome: &CorrectionOutcomeV1, dir: &Path) -> Result<PathBuf, RunError> {
    let path = dir.join(REPORT_FILE_NAME);
    let bytes = outcome.report.to_json().to_string();

    let write = |path: &Path| -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(bytes.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()
    };

    write(&path).map_err(|e| RunError::ReportWrite {
        path: path.clone(),
        detail: e.to_string(),
    })?;
    Ok(path)
}
