//! `CubeState`: sticker colours of an NxN cube.
//!
//! # Layout
//!
//! `6 * n * n` bytes, face by face in `U R F D L B` order, each face
//! row-major as seen from outside (see [`super::geometry`]). A byte is the
//! colour index of the face that colour belongs to when solved.
//!
//! # Equality semantics
//!
//! Two states are equal iff every sticker matches. There is no
//! whole-cube-rotation normalisation: move sets that can rotate the whole
//! cube (all six faces on an even cube) see rotated copies as distinct.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digest::hash::{canonical_hash, ContentHash, HashDomain};
use crate::error::PuzzleError;
use crate::puzzle::moves::Face;

/// Smallest supported edge length.
pub const MIN_SIZE: usize = 2;
/// Largest supported edge length.
pub const MAX_SIZE: usize = 5;

/// Number of colours (one per face).
pub const COLORS: usize = 6;

/// Sticker colours of an `n x n` cube.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeState {
    size: usize,
    stickers: Vec<u8>,
}

impl CubeState {
    /// The solved cube of edge length `size`.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::UnsupportedSize`] if `size` is out of range.
    pub fn solved(size: usize) -> Result<Self, PuzzleError> {
        check_size(size)?;
        let per_face = size * size;
        #[allow(clippy::cast_possible_truncation)]
        let stickers = (0..COLORS)
            .flat_map(|c| std::iter::repeat(c as u8).take(per_face))
            .collect();
        Ok(Self { size, stickers })
    }

    /// Build a state from raw sticker colours, validating it.
    ///
    /// # Errors
    ///
    /// Returns the first [`PuzzleError`] found by [`CubeState::validate`].
    pub fn from_stickers(size: usize, stickers: Vec<u8>) -> Result<Self, PuzzleError> {
        let state = Self { size, stickers };
        state.validate()?;
        Ok(state)
    }

    /// Build from a trusted permutation result. Only [`super::geometry`] calls this.
    pub(crate) fn from_parts_unchecked(size: usize, stickers: Vec<u8>) -> Self {
        Self { size, stickers }
    }

    /// Parse a facelet string such as `"UUUUUUUUURRRRRRRRR..."`.
    ///
    /// Letters name the face a sticker's colour belongs to. Whitespace is
    /// ignored, so faces may be separated for readability. The size is
    /// inferred from the sticker count.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::InvalidFacelet`] for characters outside
    /// `URFDLB`, and validation errors for impossible layouts.
    pub fn from_facelets(text: &str) -> Result<Self, PuzzleError> {
        let mut stickers = Vec::new();
        for (index, ch) in text.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let face = Face::from_letter(ch).ok_or(PuzzleError::InvalidFacelet { ch, index })?;
            stickers.push(face as u8);
        }
        let size = (MIN_SIZE..=MAX_SIZE)
            .find(|n| COLORS * n * n == stickers.len())
            .ok_or(PuzzleError::StickerCount {
                expected: COLORS * MIN_SIZE * MIN_SIZE,
                actual: stickers.len(),
            })?;
        Self::from_stickers(size, stickers)
    }

    /// Edge length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw sticker colours in layout order.
    #[must_use]
    pub fn stickers(&self) -> &[u8] {
        &self.stickers
    }

    /// Stickers of a single face.
    #[must_use]
    pub fn face(&self, face: Face) -> &[u8] {
        let per_face = self.size * self.size;
        let start = face.index() * per_face;
        &self.stickers[start..start + per_face]
    }

    /// Goal test: every face shows a single colour.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let per_face = self.size * self.size;
        per_face > 0
            && self.stickers.len() == COLORS * per_face
            && self
                .stickers
                .chunks(per_face)
                .all(|face| face.iter().all(|&c| c == face[0]))
    }

    /// Check structural validity: size, sticker count, colour range and
    /// colour balance.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        check_size(self.size)?;
        let per_face = self.size * self.size;
        let expected = COLORS * per_face;
        if self.stickers.len() != expected {
            return Err(PuzzleError::StickerCount {
                expected,
                actual: self.stickers.len(),
            });
        }
        let mut counts = [0usize; COLORS];
        for (index, &value) in self.stickers.iter().enumerate() {
            let slot = counts
                .get_mut(value as usize)
                .ok_or(PuzzleError::InvalidColor { index, value })?;
            *slot += 1;
        }
        for (color, &count) in (0u8..).zip(counts.iter()) {
            if count != per_face {
                return Err(PuzzleError::ColorImbalance {
                    color,
                    count,
                    expected: per_face,
                });
            }
        }
        Ok(())
    }

    /// Bytes that identify this state: `size || stickers`.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.stickers.len());
        bytes.push(u8::try_from(self.size).unwrap_or(u8::MAX));
        bytes.extend_from_slice(&self.stickers);
        bytes
    }

    /// Domain-separated fingerprint of [`CubeState::identity_bytes`].
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::CubeState, &self.identity_bytes())
    }
}

impl fmt::Display for CubeState {
    /// Facelet string with faces separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_face = (self.size * self.size).max(1);
        for (i, face) in self.stickers.chunks(per_face).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for &c in face {
                let letter = Face::from_index(c as usize).map_or('?', Face::letter);
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

fn check_size(size: usize) -> Result<(), PuzzleError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(PuzzleError::UnsupportedSize {
            size,
            min: MIN_SIZE,
            max: MAX_SIZE,
        })
    }
}
