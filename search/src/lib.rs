//! Cubist Search: weighted best-first search with batched heuristic evaluation.
//!
//! This crate is generic over the puzzle: it depends on no other workspace
//! crate. Concrete worlds and oracles live in `cubist_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! cubist_search            cubist_kernel
//! (queue, ledger, driver)  (cube carrier)
//!          ↖                ↗
//!           cubist_harness
//!           (worlds, oracles, worker)
//! ```
//!
//! # Key types
//!
//! - [`PriorityQueue`]: array-backed min-heap with FIFO tie-breaking
//! - [`VisitedLedger`]: fingerprint → best path cost
//! - [`SearchNode`] / [`MovePath`]: immutable frontier candidates
//! - [`SearchWorld`]: trait for puzzles that can be searched
//! - [`HeuristicOracle`] / [`OracleProvider`]: batched cost-to-goal estimates
//! - [`SearchPolicy`]: `B`, `N`, `λ` and the optional expansion budget
//! - [`search()`]: the driver

#![forbid(unsafe_code)]

pub mod cancel;
pub mod contract;
pub mod error;
pub mod ledger;
pub mod node;
pub mod oracle;
pub mod policy;
pub mod queue;
pub mod search;

pub use cancel::CancelToken;
pub use contract::{SearchWorld, WorldError};
pub use error::SearchError;
pub use ledger::VisitedLedger;
pub use node::{MovePath, SearchNode};
pub use oracle::{HeuristicOracle, OracleError, OracleProvider};
pub use policy::SearchPolicy;
pub use queue::PriorityQueue;
pub use search::{
    replay_path, search, NoopObserver, SearchEvent, SearchObserver, SearchResult, SearchStats,
    Termination,
};
