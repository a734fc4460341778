//! Shared helpers for underbound benchmark suites.

#![forbid(unsafe_code)]

use underbound_harness::worlds::sliding_tile::{SlidingTile, TileBoard};
use underbound_harness::worlds::unit_chain::UnitChain;
use underbound_search::convergence::{converge, CorrectionOutcomeV1, CorrectionPolicyV1};

/// A chain world with inflated raw estimates, sized so every state
/// verifies within the default step budget.
pub struct ChainRegime {
    pub world: UnitChain,
    pub states: Vec<u32>,
    pub h_raw: Vec<f64>,
    pub policy: CorrectionPolicyV1,
}

/// Build a chain regime of `length` states with `factor`-inflated
/// true costs as the raw heuristic.
///
/// # Panics
///
/// Panics for a zero-length chain.
#[must_use]
pub fn chain_regime(length: u32, factor: f64) -> ChainRegime {
    let world = UnitChain::new(length);
    let states = world.states();
    let h_raw = states
        .iter()
        .map(|&s| UnitChain::optimal_cost(s) * factor)
        .collect();
    ChainRegime {
        world,
        states,
        h_raw,
        policy: CorrectionPolicyV1 {
            backoff_margin: 0.0,
            parallel: false,
            ..CorrectionPolicyV1::default()
        },
    }
}

/// An 8-puzzle sample with an inflated Manhattan heuristic.
pub struct TileRegime {
    pub world: SlidingTile,
    pub states: Vec<TileBoard>,
    pub h_raw: Vec<f64>,
    pub policy: CorrectionPolicyV1,
}

/// Build a sliding-tile regime of `count` shallow scrambles (depth 4,
/// seeds `0..count`) with 1.7x-inflated Manhattan estimates.
#[must_use]
pub fn tile_regime(count: u64) -> TileRegime {
    let states: Vec<TileBoard> = (0..count).map(|seed| SlidingTile::scramble(seed, 4)).collect();
    let h_raw = states
        .iter()
        .map(|board| SlidingTile::manhattan(board) * 1.7)
        .collect();
    TileRegime {
        world: SlidingTile,
        states,
        h_raw,
        policy: CorrectionPolicyV1 {
            backoff_margin: 0.0,
            parallel: false,
            ..CorrectionPolicyV1::default()
        },
    }
}

/// Run a full correction on a chain regime.
///
/// # Panics
///
/// Panics if the run fails. Benchmark runs are expected to succeed.
#[must_use]
pub fn run_chain(regime: &ChainRegime) -> CorrectionOutcomeV1 {
    converge(&regime.world, &regime.states, &regime.h_raw, &regime.policy)
        .expect("correction should succeed in benchmarks")
}

/// Run a full correction on a tile regime.
///
/// # Panics
///
/// Panics if the run fails. Benchmark runs are expected to succeed.
#[must_use]
pub fn run_tiles(regime: &TileRegime) -> CorrectionOutcomeV1 {
    converge(&regime.world, &regime.states, &regime.h_raw, &regime.policy)
        .expect("correction should succeed in benchmarks")
}
