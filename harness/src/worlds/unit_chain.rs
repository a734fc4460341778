//! `UnitChain`: a line graph with unit edges.
//!
//! States are `0 ..= length-1`; each state neighbors its predecessor
//! and successor. The goal sits at state 0 unless the world is built
//! goalless, which makes every verification inconclusive — the
//! degenerate path worlds otherwise rarely exercise.

use underbound_search::contract::SearchEnvironmentV1;

/// Line-graph world with unit edge costs.
pub struct UnitChain {
    length: u32,
    goal_reachable: bool,
}

impl UnitChain {
    /// A chain of `length` states with the goal at state 0.
    ///
    /// # Panics
    ///
    /// Panics if `length` is 0.
    #[must_use]
    pub fn new(length: u32) -> Self {
        assert!(length > 0, "a chain needs at least one state");
        Self {
            length,
            goal_reachable: true,
        }
    }

    /// A chain whose goal test never fires.
    #[must_use]
    pub fn goalless(length: u32) -> Self {
        let mut chain = Self::new(length);
        chain.goal_reachable = false;
        chain
    }

    /// All states of the chain, in order.
    #[must_use]
    pub fn states(&self) -> Vec<u32> {
        (0..self.length).collect()
    }

    /// True optimal cost-to-go from a state (its distance to 0).
    #[must_use]
    pub fn optimal_cost(state: u32) -> f64 {
        f64::from(state)
    }
}

impl SearchEnvironmentV1 for UnitChain {
    type State = u32;

    fn expand(&self, state: &u32) -> Vec<(u32, f64)> {
        let mut children = Vec::new();
        if *state > 0 {
            children.push((state - 1, 1.0));
        }
        if state + 1 < self.length {
            children.push((state + 1, 1.0));
        }
        children
    }

    fn is_goal(&self, state: &u32) -> bool {
        self.goal_reachable && *state == 0
    }
}
