//! Correction-loop acceptance: convergence, goal invariants, round
//! capping, and serial/parallel agreement.

use underbound_search::contract::SearchEnvironmentV1;
use underbound_search::convergence::{converge, CorrectionPolicyV1, InconclusivePolicyV1};
use underbound_search::report::ConvergenceTerminationV1;

use underbound_harness::worlds::unit_chain::UnitChain;

fn policy(parallel: bool) -> CorrectionPolicyV1 {
    CorrectionPolicyV1 {
        backoff_margin: 0.0,
        parallel,
        ..CorrectionPolicyV1::default()
    }
}

#[test]
fn wild_overestimate_converges_below_true_cost() {
    // h_raw[A] = 10 with a true cost of 2.
    let chain = UnitChain::new(3);
    let states = chain.states();
    let h_raw = vec![0.0, 1.0, 10.0];

    let outcome = converge(&chain, &states, &h_raw, &policy(false)).unwrap();
    assert!(
        outcome.h_corrected[2] <= 2.0 + 1e-9,
        "h_corrected[2] = {} must not exceed the true cost 2",
        outcome.h_corrected[2]
    );
    assert_eq!(
        outcome.report.termination,
        ConvergenceTerminationV1::AllSettled
    );
}

#[test]
fn goal_states_end_solved_with_zero_admissible_estimate() {
    let chain = UnitChain::new(4);
    let states = chain.states();
    let h_raw = vec![5.0, 1.0, 2.0, 3.0];

    let outcome = converge(&chain, &states, &h_raw, &policy(false)).unwrap();
    assert!(outcome.solved[0], "the goal state must verify as solved");
    assert!(
        outcome.h_admissible[0].abs() < f64::EPSILON,
        "a goal's admissible estimate is 0, got {}",
        outcome.h_admissible[0]
    );
}

#[test]
fn returned_heuristic_is_bounded_by_raw() {
    let chain = UnitChain::new(7);
    let states = chain.states();
    let h_raw: Vec<f64> = states.iter().map(|&s| f64::from(s) * 2.5 + 0.5).collect();

    let outcome = converge(&chain, &states, &h_raw, &policy(false)).unwrap();
    for (i, (c, r)) in outcome.h_corrected.iter().zip(h_raw.iter()).enumerate() {
        assert!(c <= r, "h_corrected[{i}]={c} exceeds h_raw[{i}]={r}");
    }
}

#[test]
fn backoff_margin_softens_the_correction() {
    let chain = UnitChain::new(4);
    let states = chain.states();
    let h_raw = vec![0.0, 2.0, 4.0, 6.0];

    let strict = converge(&chain, &states, &h_raw, &policy(false)).unwrap();
    let relaxed = converge(
        &chain,
        &states,
        &h_raw,
        &CorrectionPolicyV1 {
            backoff_margin: 1.0,
            ..policy(false)
        },
    )
    .unwrap();

    for (s, r) in strict.h_corrected.iter().zip(relaxed.h_corrected.iter()) {
        assert!(
            s <= r,
            "a larger back-off must correct no more aggressively ({s} vs {r})"
        );
    }
}

#[test]
fn round_cap_fires_when_nothing_can_settle() {
    // Unsolvable world under AbortRun=false: every round re-verifies,
    // every state marks degenerate in round 0, so the loop settles. To
    // observe the cap instead, forbid degeneracy by giving the loop a
    // world whose verifications always exceed budget: a chain with the
    // goal far beyond what eta rounds can reach within one round cap.
    struct FarGoal;

    impl SearchEnvironmentV1 for FarGoal {
        type State = u64;

        fn expand(&self, state: &u64) -> Vec<(u64, f64)> {
            // Infinite ray away from the goal at 0.
            if *state == 0 {
                vec![(1, 1.0)]
            } else {
                vec![(state - 1, 1.0), (state + 1, 1.0)]
            }
        }

        fn is_goal(&self, state: &u64) -> bool {
            *state == 0
        }
    }

    // One far state with a huge raw estimate; eta=0.5 tightens h_a so
    // slowly the two-round cap cannot reach the goal's distance.
    let policy = CorrectionPolicyV1 {
        backoff_margin: 0.0,
        eta: 0.5,
        max_rounds: 2,
        inconclusive: InconclusivePolicyV1::MarkDegenerate,
        parallel: false,
    };
    let outcome = converge(&FarGoal, &[50u64], &[80.0], &policy).unwrap();
    assert_eq!(
        outcome.report.termination,
        ConvergenceTerminationV1::RoundCapReached
    );
    assert!(!outcome.solved[0]);
    assert_eq!(outcome.report.rounds.len(), 2);
}

#[test]
fn serial_and_parallel_runs_agree_exactly() {
    let chain = UnitChain::new(12);
    let states = chain.states();
    let h_raw: Vec<f64> = states
        .iter()
        .map(|&s| f64::from(s) * 1.4 + f64::from(s % 3))
        .collect();

    let serial = converge(&chain, &states, &h_raw, &policy(false)).unwrap();
    let parallel = converge(&chain, &states, &h_raw, &policy(true)).unwrap();

    assert_eq!(serial.h_corrected, parallel.h_corrected);
    assert_eq!(serial.h_admissible, parallel.h_admissible);
    assert_eq!(serial.solved, parallel.solved);
    assert_eq!(serial.report, parallel.report);
}

#[test]
fn repeated_runs_are_deterministic() {
    let chain = UnitChain::new(9);
    let states = chain.states();
    let h_raw: Vec<f64> = states.iter().map(|&s| f64::from(s) * 1.9).collect();

    let first = converge(&chain, &states, &h_raw, &policy(true)).unwrap();
    let second = converge(&chain, &states, &h_raw, &policy(true)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn goalless_world_settles_degenerate_with_anomaly_report() {
    let chain = UnitChain::goalless(3);
    let states = chain.states();
    let h_raw = vec![0.0, 1.0, 2.0];

    let outcome = converge(&chain, &states, &h_raw, &policy(false)).unwrap();
    assert!(outcome.solved.iter().all(|&s| !s));
    assert_eq!(outcome.report.anomalies.len(), 3);
    assert_eq!(
        outcome.report.termination,
        ConvergenceTerminationV1::AllSettled
    );
}
