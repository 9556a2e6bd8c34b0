//! `TableOracle`: per-node estimates for one-hot encoded worlds.
//!
//! Reads the hot index of each row and returns the table entry for it, or
//! the default for indices past the end of the table. Pairs with
//! [`GraphWorld`](crate::worlds::graph::GraphWorld) to script exact
//! expansion orders in fixtures.

use cubist_search::oracle::{HeuristicOracle, OracleError};

#[derive(Debug, Clone, PartialEq)]
pub struct TableOracle {
    values: Vec<f32>,
    default: f32,
}

impl TableOracle {
    #[must_use]
    pub fn new(values: Vec<f32>, default: f32) -> Self {
        Self { values, default }
    }
}

impl HeuristicOracle for TableOracle {
    fn name(&self) -> &str {
        "table"
    }

    fn estimate_batch(
        &self,
        states: &[Vec<f32>],
        _batch_hint: usize,
    ) -> Result<Vec<f32>, OracleError> {
        states
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let hot = row.iter().position(|&v| v > 0.5).ok_or_else(|| {
                    OracleError::Inference {
                        detail: format!("row {i} is not one-hot"),
                    }
                })?;
                Ok(self.values.get(hot).copied().unwrap_or(self.default))
            })
            .collect()
    }
}
