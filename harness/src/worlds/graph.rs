//! `GraphWorld`: an explicit transition table.
//!
//! Nodes and moves are named strings. A missing `(node, move)` edge leaves
//! the state where it is, so every move is legal everywhere and the move
//! list stays fixed. Used for fixtures and small hand-checked scenarios
//! where the exact expansion order matters.

use std::collections::{HashMap, HashSet};

use cubist_search::contract::{SearchWorld, WorldError};

/// Directed graph with named moves and a set of goal nodes.
#[derive(Debug, Clone, Default)]
pub struct GraphWorld {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    moves: Vec<String>,
    edges: HashMap<(usize, String), usize>,
    goals: HashSet<usize>,
}

impl GraphWorld {
    /// An empty graph whose legal moves are `moves`, in that order.
    #[must_use]
    pub fn new(moves: &[&str]) -> Self {
        Self {
            moves: moves.iter().map(|m| (*m).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Add `node` if absent and return its index.
    pub fn node(&mut self, node: &str) -> usize {
        if let Some(&i) = self.index.get(node) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(node.to_string());
        self.index.insert(node.to_string(), i);
        i
    }

    /// Add the transition `from --mv--> to`, creating both nodes.
    #[must_use]
    pub fn edge(mut self, from: &str, mv: &str, to: &str) -> Self {
        let from = self.node(from);
        let to = self.node(to);
        self.edges.insert((from, mv.to_string()), to);
        self
    }

    /// Mark `node` as a goal, creating it if needed.
    #[must_use]
    pub fn goal(mut self, node: &str) -> Self {
        let i = self.node(node);
        self.goals.insert(i);
        self
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of `node` in the one-hot encoding.
    #[must_use]
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.index.get(node).copied()
    }
}

impl SearchWorld for GraphWorld {
    type State = String;
    type Move = String;
    type Key = String;

    fn moves(&self) -> &[String] {
        &self.moves
    }

    fn apply(&self, state: &String, mv: &String) -> String {
        self.index
            .get(state)
            .and_then(|&from| self.edges.get(&(from, mv.clone())))
            .map_or_else(|| state.clone(), |&to| self.nodes[to].clone())
    }

    fn is_goal(&self, state: &String) -> bool {
        self.index
            .get(state)
            .is_some_and(|i| self.goals.contains(i))
    }

    fn fingerprint(&self, state: &String) -> String {
        state.clone()
    }

    /// One-hot over node indices.
    fn encode(&self, state: &String) -> Vec<f32> {
        let mut row = vec![0.0; self.nodes.len()];
        if let Some(&i) = self.index.get(state) {
            row[i] = 1.0;
        }
        row
    }

    fn validate(&self, state: &String) -> Result<(), WorldError> {
        if self.index.contains_key(state) {
            Ok(())
        } else {
            Err(WorldError::new(format!("unknown node {state:?}")))
        }
    }
}
