//! `CubeWorld`: the NxN cube as a search world.
//!
//! States are [`CubeState`] sticker layouts, moves are quarter turns, and
//! the goal is any state with every face a single colour. Fingerprints are
//! domain-separated SHA-256 hashes of the sticker bytes, so two layouts
//! collide only if they are identical.
//!
//! # Kernel boundary
//!
//! This world is a consumer of kernel primitives (`Geometry::apply`,
//! `CubeState::fingerprint`, `one_hot`). No kernel changes.

use serde::{Deserialize, Serialize};

use cubist_kernel::digest::hash::ContentHash;
use cubist_kernel::puzzle::cube::CubeState;
use cubist_kernel::puzzle::encode::one_hot;
use cubist_kernel::puzzle::geometry::Geometry;
use cubist_kernel::puzzle::moves::Turn;
use cubist_kernel::PuzzleError;

use cubist_search::contract::{SearchWorld, WorldError};

/// Which quarter turns the search may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSet {
    /// All twelve outer-layer quarter turns.
    #[default]
    Full,
    /// `U`, `R`, `F` quarter turns. On a 2x2 this loses nothing, since any
    /// state is a whole-cube rotation away from one with DLB in place.
    FixedCorner,
}

impl MoveSet {
    #[must_use]
    pub fn turns(self) -> Vec<Turn> {
        match self {
            MoveSet::Full => Turn::all(),
            MoveSet::FixedCorner => Turn::fixed_corner(),
        }
    }
}

/// Search world over cube sticker layouts of one fixed size.
#[derive(Debug, Clone)]
pub struct CubeWorld {
    geometry: Geometry,
    move_set: MoveSet,
    moves: Vec<Turn>,
}

impl CubeWorld {
    /// Build the world for `size`x`size` cubes.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::UnsupportedSize`] outside the supported range.
    pub fn new(size: usize, move_set: MoveSet) -> Result<Self, PuzzleError> {
        Ok(Self {
            geometry: Geometry::new(size)?,
            move_set,
            moves: move_set.turns(),
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.geometry.size()
    }

    #[must_use]
    pub fn move_set(&self) -> MoveSet {
        self.move_set
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The solved cube with `turns` applied.
    ///
    /// # Errors
    ///
    /// Propagates [`PuzzleError`] from building the solved state.
    pub fn scrambled(&self, turns: &[Turn]) -> Result<CubeState, PuzzleError> {
        let solved = CubeState::solved(self.size())?;
        Ok(self.geometry.apply_all(&solved, turns))
    }
}

impl SearchWorld for CubeWorld {
    type State = CubeState;
    type Move = Turn;
    type Key = ContentHash;

    fn moves(&self) -> &[Turn] {
        &self.moves
    }

    fn apply(&self, state: &CubeState, mv: &Turn) -> CubeState {
        self.geometry.apply(state, *mv)
    }

    fn is_goal(&self, state: &CubeState) -> bool {
        state.is_solved()
    }

    fn fingerprint(&self, state: &CubeState) -> ContentHash {
        state.fingerprint()
    }

    fn encode(&self, state: &CubeState) -> Vec<f32> {
        one_hot(state)
    }

    fn validate(&self, state: &CubeState) -> Result<(), WorldError> {
        if state.size() != self.size() {
            return Err(WorldError::new(format!(
                "cube of size {} submitted to a size {} world",
                state.size(),
                self.size()
            )));
        }
        state.validate().map_err(|e| WorldError::new(e.to_string()))
    }
}
