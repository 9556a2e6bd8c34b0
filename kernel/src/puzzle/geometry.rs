//! Sticker geometry and turn permutations.
//!
//! Stickers live on integer "doubled" coordinates: cubie centres take values
//! in `{-(n-1), -(n-3), ..., n-1}` on each axis and every sticker carries the
//! outward normal of its face. A quarter turn rotates every sticker whose
//! cubie sits in the turned layer, so permutation tables are derived rather
//! than written out by hand.
//!
//! Sticker order: face by face in [`Face::ALL`] order, then row-major as seen
//! from outside the face (U with F below it, the side faces with U above
//! them, D with F above it).

use std::collections::HashMap;

use crate::error::PuzzleError;
use crate::puzzle::cube::{CubeState, MAX_SIZE, MIN_SIZE};
use crate::puzzle::moves::{Direction, Face, Turn};

type Vec3 = [i32; 3];

/// In-plane `(right, down)` unit vectors for each face, as seen from outside.
const fn face_frame(face: Face) -> (Vec3, Vec3) {
    match face {
        Face::U => ([1, 0, 0], [0, 0, 1]),
        Face::R => ([0, 0, -1], [0, -1, 0]),
        Face::F => ([1, 0, 0], [0, -1, 0]),
        Face::D => ([1, 0, 0], [0, 0, -1]),
        Face::L => ([0, 0, 1], [0, -1, 0]),
        Face::B => ([-1, 0, 0], [0, -1, 0]),
    }
}

/// One counter-clockwise (right-handed) quarter rotation about `axis`.
const fn rotate_ccw(v: Vec3, axis: usize) -> Vec3 {
    let [x, y, z] = v;
    match axis {
        0 => [x, -z, y],
        1 => [z, y, -x],
        _ => [-y, x, z],
    }
}

fn rotate(v: Vec3, axis: usize, quarters: u8) -> Vec3 {
    (0..quarters).fold(v, |acc, _| rotate_ccw(acc, axis))
}

fn scale(v: Vec3, k: i32) -> Vec3 {
    [v[0] * k, v[1] * k, v[2] * k]
}

fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Precomputed turn permutations for one cube size.
///
/// `sources[t][k]` is the sticker index whose colour lands on index `k`
/// after turn `t`.
#[derive(Debug, Clone)]
pub struct Geometry {
    size: usize,
    sources: HashMap<Turn, Vec<u16>>,
}

impl Geometry {
    /// Build the permutation tables for an `n x n` cube.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::UnsupportedSize`] if `n` is out of range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(PuzzleError::UnsupportedSize {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }

        let stickers = sticker_locations(size);
        let index: HashMap<(Vec3, Vec3), usize> = stickers
            .iter()
            .enumerate()
            .map(|(i, &loc)| (loc, i))
            .collect();

        let mut sources = HashMap::new();
        for turn in Turn::all() {
            let (axis, sign) = turn.face.normal();
            // Clockwise seen from the face is clockwise about the outward
            // normal, i.e. three ccw quarters about +axis for a positive face.
            let quarters = match (sign > 0, turn.direction) {
                (true, Direction::Clockwise) | (false, Direction::CounterClockwise) => 3,
                (true, Direction::CounterClockwise) | (false, Direction::Clockwise) => 1,
            };
            let layer = sign * (size as i32 - 1);

            let mut table: Vec<u16> = (0..stickers.len()).map(|i| i as u16).collect();
            for (from, &(cubie, normal)) in stickers.iter().enumerate() {
                if cubie[axis] != layer {
                    continue;
                }
                let dest = (rotate(cubie, axis, quarters), rotate(normal, axis, quarters));
                if let Some(&to) = index.get(&dest) {
                    table[to] = from as u16;
                }
            }
            sources.insert(turn, table);
        }

        Ok(Self { size, sources })
    }

    /// Cube edge length this geometry was built for.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Apply one quarter turn, producing a new state.
    ///
    /// The caller guarantees `state.size() == self.size()`; a mismatched
    /// state is returned unchanged.
    #[must_use]
    pub fn apply(&self, state: &CubeState, turn: Turn) -> CubeState {
        let Some(table) = self.sources.get(&turn) else {
            return state.clone();
        };
        if state.size() != self.size {
            return state.clone();
        }
        let old = state.stickers();
        let stickers = table.iter().map(|&src| old[src as usize]).collect();
        CubeState::from_parts_unchecked(self.size, stickers)
    }

    /// Apply a sequence of turns left to right.
    #[must_use]
    pub fn apply_all(&self, state: &CubeState, turns: &[Turn]) -> CubeState {
        turns
            .iter()
            .fold(state.clone(), |acc, &t| self.apply(&acc, t))
    }

    /// Number of stickers a single quarter turn moves (`4n + n²` minus the
    /// centre, which stays put on odd sizes).
    #[must_use]
    pub fn stickers_moved_per_turn(&self) -> usize {
        let n = self.size;
        let face = if n % 2 == 1 { n * n - 1 } else { n * n };
        4 * n + face
    }
}

/// `(cubie_centre, outward_normal)` for every sticker in layout order.
fn sticker_locations(size: usize) -> Vec<(Vec3, Vec3)> {
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let n = size as i32;
    let mut out = Vec::with_capacity(6 * size * size);
    for face in Face::ALL {
        let (axis, sign) = face.normal();
        let mut normal = [0; 3];
        normal[axis] = sign;
        let (right, down) = face_frame(face);
        for row in 0..n {
            for col in 0..n {
                let cubie = add(
                    scale(normal, n - 1),
                    add(scale(right, 2 * col - (n - 1)), scale(down, 2 * row - (n - 1))),
                );
                out.push((cubie, normal));
            }
        }
    }
    out
}
