//! `StickerOracle`: a hand-crafted cube heuristic.
//!
//! For each face, stickers that differ from the face's most common colour
//! are counted as misplaced. The total is divided by the number of stickers
//! one quarter turn moves, giving a rough "turns remaining" figure that is
//! zero exactly on solved cubes. The estimate ignores whole-cube orientation.

use cubist_kernel::puzzle::cube::COLORS;
use cubist_kernel::puzzle::encode::{decode_colors, encoded_len};
use cubist_kernel::puzzle::geometry::Geometry;

use cubist_search::oracle::{HeuristicOracle, OracleError};

/// Misplaced-sticker estimator for one cube size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerOracle {
    size: usize,
    stickers_per_turn: f32,
}

impl StickerOracle {
    #[must_use]
    pub fn for_geometry(geometry: &Geometry) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let stickers_per_turn = geometry.stickers_moved_per_turn() as f32;
        Self {
            size: geometry.size(),
            stickers_per_turn,
        }
    }

    fn estimate_row(&self, index: usize, row: &[f32]) -> Result<f32, OracleError> {
        let expected = encoded_len(self.size);
        if row.len() != expected {
            return Err(OracleError::Inference {
                detail: format!("row {index} has {} values, expected {expected}", row.len()),
            });
        }
        let colors = decode_colors(row);
        let per_face = self.size * self.size;
        let mut misplaced = 0usize;
        for face in colors.chunks(per_face) {
            let mut counts = [0usize; COLORS];
            for (pos, color) in face.iter().enumerate() {
                let Some(c) = color else {
                    return Err(OracleError::Inference {
                        detail: format!("row {index} sticker {pos} has no colour"),
                    });
                };
                counts[usize::from(*c)] += 1;
            }
            let majority = counts.iter().max().copied().unwrap_or(0);
            misplaced += per_face - majority;
        }
        #[allow(clippy::cast_precision_loss)]
        let misplaced = misplaced as f32;
        Ok(misplaced / self.stickers_per_turn)
    }
}

impl HeuristicOracle for StickerOracle {
    fn name(&self) -> &str {
        "stickers"
    }

    fn estimate_batch(
        &self,
        states: &[Vec<f32>],
        _batch_hint: usize,
    ) -> Result<Vec<f32>, OracleError> {
        states
            .iter()
            .enumerate()
            .map(|(i, row)| self.estimate_row(i, row))
            .collect()
    }
}
