//! Solver configuration file.
//!
//! ```json
//! {
//!   "cube_size": 3,
//!   "move_set": "full",
//!   "search": { "batch_size": 1000, "round_size": 100, "path_weight": 0.6 },
//!   "oracle": { "kind": "model", "path": "weights/cube3.json" }
//! }
//! ```
//!
//! Every field is optional. A missing `oracle` means the sticker heuristic.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cubist_kernel::puzzle::cube::{MAX_SIZE, MIN_SIZE};
use cubist_search::oracle::{ClonedProvider, OracleProvider};
use cubist_search::policy::SearchPolicy;

use crate::oracles::mlp::MlpModelFile;
use crate::oracles::stickers::StickerOracle;
use crate::worlds::cube::{CubeWorld, MoveSet};

/// Failure to load or use a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {detail}")]
    Invalid { detail: String },
}

/// Which heuristic to search with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OracleConfig {
    /// The built-in misplaced-sticker estimate.
    #[default]
    Stickers,
    /// A dense network read from a weights file on each solve.
    Model { path: PathBuf },
}

/// Top-level solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    #[serde(default = "default_cube_size")]
    pub cube_size: usize,
    #[serde(default)]
    pub move_set: MoveSet,
    #[serde(default)]
    pub search: SearchPolicy,
    #[serde(default)]
    pub oracle: OracleConfig,
}

fn default_cube_size() -> usize {
    3
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cube_size: default_cube_size(),
            move_set: MoveSet::default(),
            search: SearchPolicy::default(),
            oracle: OracleConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Read and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on I/O, parse, or validation failure.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unsupported cube size or an
    /// unusable search policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.cube_size) {
            return Err(ConfigError::Invalid {
                detail: format!(
                    "cube_size {} outside {MIN_SIZE}..={MAX_SIZE}",
                    self.cube_size
                ),
            });
        }
        self.search.validate().map_err(|e| ConfigError::Invalid {
            detail: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the world cannot be built.
    pub fn build_world(&self) -> Result<CubeWorld, ConfigError> {
        CubeWorld::new(self.cube_size, self.move_set).map_err(|e| ConfigError::Invalid {
            detail: e.to_string(),
        })
    }

    /// The oracle provider for `world`. Model files are not read until the
    /// first solve acquires an oracle.
    #[must_use]
    pub fn build_provider(&self, world: &CubeWorld) -> Box<dyn OracleProvider> {
        match &self.oracle {
            OracleConfig::Stickers => Box::new(ClonedProvider(StickerOracle::for_geometry(
                world.geometry(),
            ))),
            OracleConfig::Model { path } => Box::new(MlpModelFile::new(path.clone())),
        }
    }
}
