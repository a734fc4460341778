//! Verifier acceptance: the three-state path scenario and budget
//! behavior.

use underbound_kernel::index::{StateHandle, StateIndex};
use underbound_search::contract::SearchEnvironmentV1;
use underbound_search::verifier::{verify, VerifyOutcomeV1};

/// `A → B → C`, unit edges, `C` is the goal.
struct PathWorld;

impl SearchEnvironmentV1 for PathWorld {
    type State = char;

    fn expand(&self, state: &char) -> Vec<(char, f64)> {
        match state {
            'A' => vec![('B', 1.0)],
            'B' => vec![('C', 1.0)],
            _ => Vec::new(),
        }
    }

    fn is_goal(&self, state: &char) -> bool {
        *state == 'C'
    }
}

fn path_index() -> StateIndex<char> {
    StateIndex::from_batch(['A', 'B', 'C'])
}

#[test]
fn path_scenario_solves_a_at_true_cost() {
    // h_raw = {A:3, B:1, C:0}; with matching admissible estimates the
    // corrector is the identity, so the verifier runs on h_raw itself.
    let h_corrected = vec![3.0, 1.0, 0.0];
    let run = verify(&PathWorld, &path_index(), &h_corrected, StateHandle(0), 3.0 + 5.0).unwrap();
    assert_eq!(run.outcome, VerifyOutcomeV1::Solved { cost: 2.0 });
}

#[test]
fn goal_start_solves_immediately() {
    let run = verify(
        &PathWorld,
        &path_index(),
        &[3.0, 1.0, 0.0],
        StateHandle(2),
        5.0,
    )
    .unwrap();
    assert_eq!(run.outcome, VerifyOutcomeV1::Solved { cost: 0.0 });
    assert_eq!(run.expansions, 0);
}

#[test]
fn budget_exceeded_reports_the_frontier_nodes_heuristic() {
    // max_step below A's own f: the very first pop exceeds budget.
    let run = verify(
        &PathWorld,
        &path_index(),
        &[3.0, 1.0, 0.0],
        StateHandle(0),
        2.0,
    )
    .unwrap();
    assert_eq!(run.outcome, VerifyOutcomeV1::BudgetExceeded { estimate: 3.0 });
}

#[test]
fn increasing_budget_never_converts_solved_to_unsolved() {
    let index = path_index();
    let h_corrected = vec![3.0, 1.0, 0.0];

    let mut previous_solved = false;
    for max_step in [0.0, 1.0, 2.0, 3.0, 8.0, 100.0] {
        let run = verify(&PathWorld, &index, &h_corrected, StateHandle(0), max_step).unwrap();
        let solved = matches!(run.outcome, VerifyOutcomeV1::Solved { .. });
        assert!(
            solved || !previous_solved,
            "raising max_step to {max_step} lost a solved result"
        );
        previous_solved = solved;
    }
}

#[test]
fn solved_cost_is_optimal_under_admissible_heuristic() {
    // Diamond: two routes to the goal, one cheaper. The admissible
    // heuristic must steer the verifier to the optimal cost.
    struct Diamond;

    impl SearchEnvironmentV1 for Diamond {
        type State = u8;

        fn expand(&self, state: &u8) -> Vec<(u8, f64)> {
            match state {
                0 => vec![(1, 1.0), (2, 1.0)],
                1 => vec![(3, 1.0)],
                2 => vec![(3, 3.0)],
                _ => Vec::new(),
            }
        }

        fn is_goal(&self, state: &u8) -> bool {
            *state == 3
        }
    }

    let index = StateIndex::from_batch([0u8, 1, 2, 3]);
    let h = vec![2.0, 1.0, 3.0, 0.0];
    let run = verify(&Diamond, &index, &h, StateHandle(0), 10.0).unwrap();
    assert_eq!(run.outcome, VerifyOutcomeV1::Solved { cost: 2.0 });
}
