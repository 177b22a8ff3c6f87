//! One-shot reveal bookkeeping for elements entering the viewport.

use std::collections::HashSet;
use std::hash::Hash;

/// Observers can report a ratio a rounding error under the threshold they fired for.
const RATIO_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Mark the element revealed and stop observing it.
    Reveal,
    Ignore,
}

/// Tracks which elements have already been revealed.
#[derive(Debug)]
pub struct RevealTracker<K> {
    threshold: f64,
    revealed: HashSet<K>,
}

impl<K: Eq + Hash> RevealTracker<K> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            revealed: HashSet::new(),
        }
    }

    /// Feed one intersection sample for `key`.
    ///
    /// Returns [`RevealAction::Reveal`] exactly once per key, the first time
    /// it is intersecting with at least `threshold` of its area visible.
    pub fn observe(&mut self, key: K, intersecting: bool, ratio: f64) -> RevealAction {
        if !intersecting || ratio + RATIO_SLACK < self.threshold {
            return RevealAction::Ignore;
        }
        if self.revealed.insert(key) {
            RevealAction::Reveal
        } else {
            RevealAction::Ignore
        }
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }
}
