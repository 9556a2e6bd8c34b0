//! Typed search errors.
//!
//! `SearchError` covers failures that abort a search. Running out of
//! frontier, budget, or being cancelled are normal outcomes expressed by
//! [`crate::search::Termination`], not errors.

use crate::contract::WorldError;
use crate::oracle::OracleError;

/// Failure that ends a search without an answer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The policy cannot drive a search. Raised before any search work.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
    /// The start state was rejected by the world. Raised before any queue work.
    #[error(transparent)]
    MalformedInput(#[from] WorldError),
    /// The oracle could not be obtained or failed mid-search. Not retried.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
