//! Environment collaborator contract.

use std::hash::Hash;

/// Trait for environments that supply transition and goal-test
/// semantics to the verifier.
///
/// # Contract
///
/// - `expand` must be deterministic: same state → same children in the
///   same order. Edge costs must be finite and non-negative (observed
///   uniformly 1 in practice, but not required to be).
/// - `is_goal` must be consistent for the whole batch.
/// - State equality and hashing must be value-based and derived from
///   the state's contents; states are map keys across the run.
///
/// Implementations must be `Send + Sync`: one verification round runs
/// one independent search per sample state across a worker pool, and
/// every run reads the same environment.
pub trait SearchEnvironmentV1: Send + Sync {
    /// Opaque state value.
    type State: Clone + Eq + Hash + Send + Sync;

    /// All `(child, edge_cost)` successors of a state.
    fn expand(&self, state: &Self::State) -> Vec<(Self::State, f64)>;

    /// Whether the state satisfies the environment's goal.
    fn is_goal(&self, state: &Self::State) -> bool;
}
