//! Raw-heuristic sources.
//!
//! The engine treats the heuristic provider as an external collaborator
//! that hands over one non-negative float per state. These sources
//! stand in for a learned approximator in tests and benchmarks; the
//! inflated variants are deliberately inadmissible so the correction
//! step has something to do.

use std::collections::HashMap;
use std::hash::Hash;

/// A provider of raw cost-to-go estimates.
pub trait HeuristicSourceV1<S> {
    /// Raw estimate for a state. Must be non-negative and finite.
    fn estimate(&self, state: &S) -> f64;

    /// Estimates for a whole sample, aligned with the input order.
    fn estimate_batch(&self, states: &[S]) -> Vec<f64> {
        states.iter().map(|s| self.estimate(s)).collect()
    }
}

/// Inflates an inner admissible estimate by a constant factor,
/// producing a controlled overestimation.
pub struct InflatedSource<F> {
    inner: F,
    factor: f64,
}

impl<F> InflatedSource<F> {
    /// Wrap `inner` (a per-state estimate) with inflation `factor >= 1`.
    pub fn new(inner: F, factor: f64) -> Self {
        Self { inner, factor }
    }
}

impl<S, F: Fn(&S) -> f64> HeuristicSourceV1<S> for InflatedSource<F> {
    fn estimate(&self, state: &S) -> f64 {
        (self.inner)(state) * self.factor
    }
}

/// Fixed per-state estimates for scripted scenarios; unknown states
/// read 0.
pub struct TableSource<S> {
    entries: HashMap<S, f64>,
}

impl<S: Eq + Hash> TableSource<S> {
    /// Build from explicit `(state, estimate)` pairs.
    pub fn new<I: IntoIterator<Item = (S, f64)>>(pairs: I) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }
}

impl<S: Eq + Hash> HeuristicSourceV1<S> for TableSource<S> {
    fn estimate(&self, state: &S) -> f64 {
        self.entries.get(state).copied().unwrap_or(0.0)
    }
}
