//! Handle-keyed best-first frontier.
//!
//! `open` maps each frontier handle to its accumulated path cost `g`;
//! `closed` holds finalized costs. The heap orders by `(f, handle)`
//! with `f64::total_cmp`, so extraction is deterministic: lowest `f`
//! first, ties broken by lowest handle.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use underbound_kernel::index::StateHandle;

/// Heap ordering key: `(f, handle)`.
///
/// `f` is fixed at push time; the corrected heuristic is frozen for the
/// whole verification run, so keys never go stale while open.
#[derive(Debug, Clone, Copy)]
pub struct OpenKey {
    pub f: f64,
    pub handle: StateHandle,
}

impl PartialEq for OpenKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for OpenKey {}

impl PartialOrd for OpenKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.handle.cmp(&other.handle))
    }
}

/// What happened to a child offered to the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOutcome {
    /// Unseen handle, now open.
    Inserted,
    /// Was closed with a higher cost; moved back to open with the
    /// improved cost.
    Reopened,
    /// Already open. The existing entry is kept even if the offered
    /// cost is lower — no decrease-key is performed for open entries.
    /// Known gap, preserved deliberately; see the module docs of
    /// `verifier`.
    AlreadyOpen,
    /// Closed with a cost no higher than the offered one; dropped.
    ClosedNotBetter,
}

/// Best-first frontier for one verification run.
pub struct OpenList {
    heap: BinaryHeap<Reverse<OpenKey>>,
    open: HashMap<StateHandle, f64>,
    closed: HashMap<StateHandle, f64>,
    high_water: u64,
}

impl OpenList {
    /// Create a frontier seeded with the start handle at `g = 0`.
    #[must_use]
    pub fn seeded(start: StateHandle, start_f: f64) -> Self {
        let mut frontier = Self {
            heap: BinaryHeap::new(),
            open: HashMap::new(),
            closed: HashMap::new(),
            high_water: 0,
        };
        frontier.insert(start, 0.0, start_f);
        frontier
    }

    fn insert(&mut self, handle: StateHandle, g: f64, f: f64) {
        self.open.insert(handle, g);
        self.heap.push(Reverse(OpenKey { f, handle }));
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Offer a child at accumulated cost `g` and priority `f`.
    pub fn offer(&mut self, handle: StateHandle, g: f64, f: f64) -> OfferOutcome {
        if self.open.contains_key(&handle) {
            return OfferOutcome::AlreadyOpen;
        }
        if let Some(&closed_g) = self.closed.get(&handle) {
            if g < closed_g {
                self.closed.remove(&handle);
                self.insert(handle, g, f);
                return OfferOutcome::Reopened;
            }
            return OfferOutcome::ClosedNotBetter;
        }
        self.insert(handle, g, f);
        OfferOutcome::Inserted
    }

    /// Pop the open handle with minimum `(f, handle)`.
    ///
    /// Returns `(handle, g, f)`. The handle leaves the open set; the
    /// caller finalizes it with [`OpenList::close`] after expansion.
    pub fn pop_min(&mut self) -> Option<(StateHandle, f64, f64)> {
        let Reverse(key) = self.heap.pop()?;
        // Every heap entry mirrors exactly one open-map entry: offer()
        // refuses handles that are already open, and reopening only
        // happens after the previous entry was popped.
        let g = self
            .open
            .remove(&key.handle)
            .expect("heap entry mirrors an open-map entry");
        Some((key.handle, g, key.f))
    }

    /// Finalize a popped handle at cost `g`.
    pub fn close(&mut self, handle: StateHandle, g: f64) {
        self.closed.insert(handle, g);
    }

    /// Number of open handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Whether the open set is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// High-water mark of the open set.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
