//! Visited-state ledger: fingerprint → cheapest path cost seen so far.
//!
//! Uses `HashMap` (not `BTreeMap`): lookups are exact-match only and the
//! ledger is never iterated or serialized.

use std::collections::HashMap;
use std::hash::Hash;

/// Per-search record of the best path cost at which each state was reached.
#[derive(Debug, Clone)]
pub struct VisitedLedger<K> {
    best: HashMap<K, u32>,
}

impl<K: Eq + Hash> VisitedLedger<K> {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            best: HashMap::new(),
        }
    }

    /// Record the start state at cost 0.
    pub fn seed(&mut self, key: K) {
        self.best.insert(key, 0);
    }

    /// Offer a state reached at `cost`.
    ///
    /// Returns `true` and records the cost if the state is new or `cost` is
    /// strictly cheaper than the recorded one. Returns `false` (and leaves the
    /// record untouched) if it was already reached as cheaply or cheaper.
    pub fn admit(&mut self, key: K, cost: u32) -> bool {
        match self.best.get_mut(&key) {
            Some(recorded) if *recorded <= cost => false,
            Some(recorded) => {
                *recorded = cost;
                true
            }
            None => {
                self.best.insert(key, cost);
                true
            }
        }
    }

    /// Cheapest recorded cost for `key`.
    #[must_use]
    pub fn best_cost(&self, key: &K) -> Option<u32> {
        self.best.get(key).copied()
    }

    /// Whether a node for `key` at `cost` has been superseded by a strictly
    /// cheaper path recorded after it was queued.
    #[must_use]
    pub fn is_stale(&self, key: &K, cost: u32) -> bool {
        self.best_cost(key).is_some_and(|best| best < cost)
    }

    /// Number of distinct states recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

impl<K: Eq + Hash> Default for VisitedLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}
