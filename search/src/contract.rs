//! Search world contract trait.

use std::fmt::Debug;
use std::hash::Hash;

/// A start state the world cannot process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed state: {detail}")]
pub struct WorldError {
    pub detail: String,
}

impl WorldError {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// A puzzle the driver can search.
///
/// # Contract
///
/// - `moves` returns the same moves in the same order on every call; that
///   order decides priority ties, never correctness.
/// - `apply` is pure and deterministic.
/// - `fingerprint` is injective over reachable states.
/// - `encode` produces the oracle's input row for a state.
/// - `validate` accepts every state `apply` can produce from a valid state.
pub trait SearchWorld {
    /// A puzzle configuration.
    type State: Clone;
    /// An atomic, invertible move.
    type Move: Clone + Debug;
    /// Canonical identifier of a state.
    type Key: Eq + Hash + Clone + Debug;

    /// Legal moves in their fixed order.
    fn moves(&self) -> &[Self::Move];

    /// Successor of `state` under `mv`.
    fn apply(&self, state: &Self::State, mv: &Self::Move) -> Self::State;

    /// Goal test.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Deduplication key.
    fn fingerprint(&self, state: &Self::State) -> Self::Key;

    /// Oracle input encoding.
    fn encode(&self, state: &Self::State) -> Vec<f32>;

    /// Reject states this world cannot process.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] describing the first problem found.
    fn validate(&self, state: &Self::State) -> Result<(), WorldError>;
}
