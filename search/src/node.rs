//! Search nodes and their move paths.

use std::rc::Rc;

/// One link of a persistent path: the last move plus the shared prefix.
#[derive(Debug)]
struct PathLink<M> {
    mv: M,
    prefix: Option<Rc<PathLink<M>>>,
}

/// Ordered moves from the start state, shared structurally between nodes.
///
/// Extending a path is O(1) and never touches the parent's path, so nodes
/// stay immutable while siblings share one prefix.
#[derive(Debug)]
pub struct MovePath<M> {
    head: Option<Rc<PathLink<M>>>,
    len: u32,
}

impl<M> MovePath<M> {
    /// The empty path.
    #[must_use]
    pub fn empty() -> Self {
        Self { head: None, len: 0 }
    }

    /// A new path equal to `self` followed by `mv`.
    #[must_use]
    pub fn extended(&self, mv: M) -> Self {
        Self {
            head: Some(Rc::new(PathLink {
                mv,
                prefix: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Number of moves.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether the path has no moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The most recent move.
    #[must_use]
    pub fn last(&self) -> Option<&M> {
        self.head.as_deref().map(|link| &link.mv)
    }
}

impl<M: Clone> MovePath<M> {
    /// Moves in order from the start state.
    #[must_use]
    pub fn to_vec(&self) -> Vec<M> {
        let mut out = Vec::with_capacity(self.len as usize);
        let mut cursor = self.head.as_deref();
        while let Some(link) = cursor {
            out.push(link.mv.clone());
            cursor = link.prefix.as_deref();
        }
        out.reverse();
        out
    }
}

impl<M> Clone for MovePath<M> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<M> Drop for MovePath<M> {
    /// Unlinks iteratively. The derived drop recurses once per move and
    /// overflows the stack on deep paths.
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(link) = cursor {
            cursor = match Rc::try_unwrap(link) {
                Ok(mut owned) => owned.prefix.take(),
                // Another path still shares the rest of the chain.
                Err(_) => None,
            };
        }
    }
}

impl<M> Default for MovePath<M> {
    fn default() -> Self {
        Self::empty()
    }
}

/// An immutable frontier candidate.
///
/// Invariant: `path.len() == path_cost`. Expansion builds new nodes through
/// [`SearchNode::child`]; nothing mutates a node after construction.
#[derive(Debug, Clone)]
pub struct SearchNode<S, M> {
    state: S,
    path: MovePath<M>,
    heuristic: f64,
}

impl<S, M> SearchNode<S, M> {
    /// The start node: empty path, zero estimate.
    #[must_use]
    pub fn root(state: S) -> Self {
        Self {
            state,
            path: MovePath::empty(),
            heuristic: 0.0,
        }
    }

    /// A successor reached from `self` by `mv`. Its estimate is filled in
    /// later by [`SearchNode::with_heuristic`].
    #[must_use]
    pub fn child(&self, state: S, mv: M) -> Self {
        Self {
            state,
            path: self.path.extended(mv),
            heuristic: 0.0,
        }
    }

    /// The same node carrying an oracle estimate.
    #[must_use]
    pub fn with_heuristic(self, heuristic: f64) -> Self {
        Self { heuristic, ..self }
    }

    /// Moves taken from the start state.
    #[must_use]
    pub fn path_cost(&self) -> u32 {
        self.path.len()
    }

    /// Predicted remaining cost to the goal.
    #[must_use]
    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[must_use]
    pub fn path(&self) -> &MovePath<M> {
        &self.path
    }

    /// `λ · path_cost + h`, the frontier priority.
    #[must_use]
    pub fn priority(&self, path_weight: f64) -> f64 {
        path_weight * f64::from(self.path_cost()) + self.heuristic
    }
}
