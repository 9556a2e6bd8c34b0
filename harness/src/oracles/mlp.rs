//! `MlpOracle`: inference-only dense network loaded from a JSON weights file.
//!
//! File format:
//!
//! ```json
//! { "layers": [ { "weights": [[...], ...], "bias": [...] }, ... ] }
//! ```
//!
//! `weights` is row-major `[out][in]`. ReLU is applied between layers, never
//! after the last one, and the last layer must have exactly one output: the
//! estimated number of moves to the goal. Shapes are checked once at load.
//! Training is out of scope; this module only evaluates a finished model.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cubist_kernel::digest::hash::{canonical_hash, ContentHash, HashDomain};
use cubist_search::oracle::{HeuristicOracle, OracleError, OracleProvider};

/// One fully connected layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

impl DenseLayer {
    fn inputs(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn outputs(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f32], relu: bool) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                let z = row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b;
                if relu {
                    z.max(0.0)
                } else {
                    z
                }
            })
            .collect()
    }
}

/// Serialised network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpWeights {
    pub layers: Vec<DenseLayer>,
}

/// A shape-checked network ready for inference.
#[derive(Debug, Clone)]
pub struct MlpOracle {
    layers: Vec<DenseLayer>,
    digest: ContentHash,
}

impl MlpOracle {
    /// Parse and shape-check a weights file's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Unavailable`] if the JSON is malformed or the
    /// layer shapes do not chain to a single output.
    pub fn from_json(bytes: &[u8]) -> Result<Self, OracleError> {
        let weights: MlpWeights =
            serde_json::from_slice(bytes).map_err(|e| OracleError::Unavailable {
                detail: format!("weights file is not valid JSON: {e}"),
            })?;
        Self::new(weights, canonical_hash(HashDomain::OracleWeights, bytes))
    }

    /// Shape-check `weights` and wrap them. `digest` identifies the source.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Unavailable`] describing the first bad layer.
    pub fn new(weights: MlpWeights, digest: ContentHash) -> Result<Self, OracleError> {
        let unavailable = |detail: String| OracleError::Unavailable { detail };
        let Some(last) = weights.layers.last() else {
            return Err(unavailable("model has no layers".into()));
        };
        if last.outputs() != 1 {
            return Err(unavailable(format!(
                "last layer has {} outputs, expected 1",
                last.outputs()
            )));
        }

        let mut width = None;
        for (i, layer) in weights.layers.iter().enumerate() {
            if layer.weights.len() != layer.bias.len() {
                return Err(unavailable(format!(
                    "layer {i}: {} weight rows but {} biases",
                    layer.weights.len(),
                    layer.bias.len()
                )));
            }
            let inputs = layer.inputs();
            if inputs == 0 || layer.weights.iter().any(|row| row.len() != inputs) {
                return Err(unavailable(format!("layer {i}: ragged or empty weight rows")));
            }
            if let Some(prev) = width {
                if prev != inputs {
                    return Err(unavailable(format!(
                        "layer {i} takes {inputs} inputs but layer {} produces {prev}",
                        i - 1
                    )));
                }
            }
            let finite = layer
                .bias
                .iter()
                .chain(layer.weights.iter().flatten())
                .all(|v| v.is_finite());
            if !finite {
                return Err(unavailable(format!("layer {i}: non-finite parameter")));
            }
            width = Some(layer.outputs());
        }

        Ok(Self {
            layers: weights.layers,
            digest,
        })
    }

    /// Number of input features the first layer expects.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::inputs)
    }

    /// Content hash of the weights this oracle was built from.
    #[must_use]
    pub fn digest(&self) -> &ContentHash {
        &self.digest
    }

    fn forward(&self, row: &[f32]) -> f32 {
        let last = self.layers.len() - 1;
        let mut activation = row.to_vec();
        for (i, layer) in self.layers.iter().enumerate() {
            activation = layer.forward(&activation, i != last);
        }
        activation.first().copied().unwrap_or(f32::NAN)
    }
}

impl HeuristicOracle for MlpOracle {
    fn name(&self) -> &str {
        "mlp"
    }

    fn estimate_batch(
        &self,
        states: &[Vec<f32>],
        batch_hint: usize,
    ) -> Result<Vec<f32>, OracleError> {
        let expected = self.input_len();
        let mut out = Vec::with_capacity(states.len());
        for (chunk_index, chunk) in states.chunks(batch_hint.max(1)).enumerate() {
            tracing::trace!(chunk = chunk_index, rows = chunk.len(), "mlp forward");
            for row in chunk {
                if row.len() != expected {
                    return Err(OracleError::Inference {
                        detail: format!(
                            "row {} has {} features, model expects {expected}",
                            out.len(),
                            row.len()
                        ),
                    });
                }
                out.push(self.forward(row));
            }
        }
        Ok(out)
    }
}

/// Provider that loads an [`MlpOracle`] from disk on every acquire.
#[derive(Debug, Clone)]
pub struct MlpModelFile {
    path: PathBuf,
}

impl MlpModelFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OracleProvider for MlpModelFile {
    fn acquire(&self) -> Result<Box<dyn HeuristicOracle>, OracleError> {
        let bytes = std::fs::read(&self.path).map_err(|e| OracleError::Unavailable {
            detail: format!("cannot read {}: {e}", self.path.display()),
        })?;
        let oracle = MlpOracle::from_json(&bytes)?;
        tracing::info!(
            path = %self.path.display(),
            weights = oracle.digest().short(16),
            inputs = oracle.input_len(),
            layers = oracle.layers.len(),
            "loaded heuristic model"
        );
        Ok(Box::new(oracle))
    }
}
