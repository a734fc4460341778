//! Dense handle arena for opaque states.
//!
//! Every component of the engine addresses states by [`StateHandle`],
//! never by structural identity. Handles are assigned once per batch in
//! input order and stay stable for the lifetime of one correction run,
//! so heuristic columns and search frontiers can be indexed by plain
//! integers.

use std::collections::HashMap;
use std::hash::Hash;

/// Dense integer identity for a state within one correction run.
///
/// Handles double as the deterministic tie-break for frontier
/// extraction: lower handle wins on an `f` tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateHandle(pub u32);

impl StateHandle {
    /// The handle as a vector index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StateHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Arena mapping opaque states to dense handles.
///
/// States must carry value-based equality and a hash derived from their
/// contents; the arena relies on both being stable for the whole batch.
/// Interning the same state twice returns the first handle.
pub struct StateIndex<S> {
    states: Vec<S>,
    by_state: HashMap<S, StateHandle>,
}

impl<S: Eq + Hash + Clone> StateIndex<S> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            by_state: HashMap::new(),
        }
    }

    /// Intern every state of a batch in input order.
    pub fn from_batch<I: IntoIterator<Item = S>>(batch: I) -> Self {
        let mut index = Self::new();
        for state in batch {
            index.intern(state);
        }
        index
    }

    /// Intern a state, returning its handle.
    ///
    /// A state seen before returns its existing handle; handle values
    /// are never reused or reassigned.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct states are interned.
    pub fn intern(&mut self, state: S) -> StateHandle {
        if let Some(&handle) = self.by_state.get(&state) {
            return handle;
        }
        let handle = StateHandle(u32::try_from(self.states.len()).expect("handle space exhausted"));
        self.states.push(state.clone());
        self.by_state.insert(state, handle);
        handle
    }

    /// Look up the handle of a previously interned state.
    #[must_use]
    pub fn handle_of(&self, state: &S) -> Option<StateHandle> {
        self.by_state.get(state).copied()
    }

    /// The state behind a handle.
    ///
    /// Returns `None` for handles not assigned by this arena.
    #[must_use]
    pub fn state(&self, handle: StateHandle) -> Option<&S> {
        self.states.get(handle.index())
    }

    /// Number of distinct states interned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate handles in assignment order.
    pub fn handles(&self) -> impl Iterator<Item = StateHandle> {
        #[allow(clippy::cast_possible_truncation)]
        (0..self.states.len() as u32).map(StateHandle)
    }
}

impl<S: Eq + Hash + Clone> Default for StateIndex<S> {
    fn default() -> Self {
        Self::new()
    }
}
