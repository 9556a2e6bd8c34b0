//! Heuristic oracle contract: batched cost-to-goal estimates.
//!
//! The oracle is a black box. The driver hands it one batch per round and
//! checks the reply's shape; it never retries a failed call.

/// Failure to obtain or run the heuristic oracle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    /// The oracle could not be loaded or initialised.
    #[error("heuristic oracle unavailable: {detail}")]
    Unavailable { detail: String },
    /// The oracle failed while evaluating a batch.
    #[error("heuristic oracle inference failed: {detail}")]
    Inference { detail: String },
    /// The oracle returned the wrong number of estimates.
    #[error("heuristic oracle returned {actual} estimates for {expected} states")]
    ArityMismatch { expected: usize, actual: usize },
    /// An estimate was NaN or infinite.
    #[error("heuristic oracle returned a non-finite estimate at index {index}: {value}")]
    NonFiniteEstimate { index: usize, value: f32 },
}

/// Batched heuristic evaluation.
///
/// Implementations must return exactly one estimate per input row, in input
/// order. `batch_hint` is the caller's preferred evaluation batch size; the
/// oracle may split `states` internally into chunks of that size.
pub trait HeuristicOracle: Send {
    /// Short identifier for log lines.
    fn name(&self) -> &str;

    /// Estimate remaining cost for each encoded state.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Inference`] if evaluation fails.
    fn estimate_batch(
        &self,
        states: &[Vec<f32>],
        batch_hint: usize,
    ) -> Result<Vec<f32>, OracleError>;
}

/// Source of an oracle instance, acquired once per search.
///
/// Dropping the returned box releases whatever the oracle holds; the worker
/// drops it exactly once when the search ends, on every exit path.
pub trait OracleProvider: Send + Sync {
    /// Load or initialise an oracle.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Unavailable`] if the oracle cannot be obtained.
    fn acquire(&self) -> Result<Box<dyn HeuristicOracle>, OracleError>;
}

/// Estimates every state at the same constant cost.
///
/// With `ConstantOracle(0.0)` and `λ > 0` the search degenerates to
/// breadth-first order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantOracle(pub f32);

impl HeuristicOracle for ConstantOracle {
    fn name(&self) -> &str {
        "constant"
    }

    fn estimate_batch(
        &self,
        states: &[Vec<f32>],
        _batch_hint: usize,
    ) -> Result<Vec<f32>, OracleError> {
        Ok(vec![self.0; states.len()])
    }
}

/// Provider that hands out clones of a ready-made oracle.
#[derive(Debug, Clone)]
pub struct ClonedProvider<O>(pub O);

impl<O> OracleProvider for ClonedProvider<O>
where
    O: HeuristicOracle + Clone + Sync + 'static,
{
    fn acquire(&self) -> Result<Box<dyn HeuristicOracle>, OracleError> {
        Ok(Box::new(self.0.clone()))
    }
}

/// Check an oracle reply against its batch and clamp negative estimates to 0.
///
/// # Errors
///
/// Returns [`OracleError::ArityMismatch`] or [`OracleError::NonFiniteEstimate`].
pub fn check_estimates(expected: usize, estimates: Vec<f32>) -> Result<Vec<f64>, OracleError> {
    if estimates.len() != expected {
        return Err(OracleError::ArityMismatch {
            expected,
            actual: estimates.len(),
        });
    }
    estimates
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            if value.is_finite() {
                Ok(f64::from(value.max(0.0)))
            } else {
                Err(OracleError::NonFiniteEstimate { index, value })
            }
        })
        .collect()
}
