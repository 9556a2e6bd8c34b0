//! Search policy: batch size, round size, path weight, and budget.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Search-specific tuning and budget.
///
/// Deserialises from JSON with every field optional:
///
/// ```json
/// { "batch_size": 1000, "round_size": 100, "path_weight": 0.6 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPolicy {
    /// Preferred oracle evaluation batch size (`B`). Passed to the oracle as
    /// a hint; a round's successors are never split by the driver.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Frontier nodes popped per round before the next oracle call (`N`).
    #[serde(default = "default_round_size")]
    pub round_size: usize,

    /// Weight of path cost against the heuristic estimate (`λ`).
    /// `0` is greedy best-first; large values approach breadth-first.
    #[serde(default = "default_path_weight")]
    pub path_weight: f64,

    /// Hard cap on node expansions. `None` searches until the goal is found
    /// or the frontier is exhausted.
    #[serde(default)]
    pub max_expansions: Option<u64>,
}

fn default_batch_size() -> usize {
    1000
}
fn default_round_size() -> usize {
    100
}
fn default_path_weight() -> f64 {
    0.6
}

impl SearchPolicy {
    /// Check that the policy can drive a search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `batch_size` or `round_size`
    /// is zero, or `path_weight` is negative or not finite.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.batch_size == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "batch_size must be at least 1".into(),
            });
        }
        if self.round_size == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "round_size must be at least 1".into(),
            });
        }
        if !self.path_weight.is_finite() || self.path_weight < 0.0 {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "path_weight must be finite and non-negative, got {}",
                    self.path_weight
                ),
            });
        }
        Ok(())
    }

    /// Compact JSON form, used for digests and log lines.
    ///
    /// # Errors
    ///
    /// Returns the serializer error (never expected for this struct).
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            round_size: default_round_size(),
            path_weight: default_path_weight(),
            max_expansions: None,
        }
    }
}
