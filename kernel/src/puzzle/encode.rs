//! Estimator input encoding.
//!
//! One-hot over colours per sticker: index `sticker * 6 + colour` is `1.0`,
//! everything else `0.0`. Length is `6 * n * n * 6`.

use crate::puzzle::cube::{CubeState, COLORS};

/// Encoded width for an `n x n` cube.
#[must_use]
pub const fn encoded_len(size: usize) -> usize {
    COLORS * size * size * COLORS
}

/// One-hot encode a state for the heuristic estimator.
#[must_use]
pub fn one_hot(state: &CubeState) -> Vec<f32> {
    let mut out = vec![0.0; state.stickers().len() * COLORS];
    for (i, &color) in state.stickers().iter().enumerate() {
        if let Some(slot) = out.get_mut(i * COLORS + color as usize) {
            *slot = 1.0;
        }
    }
    out
}

/// Recover the colour of each sticker from a one-hot row.
///
/// Stickers whose row is all zero (not produced by [`one_hot`]) decode to
/// `None`.
#[must_use]
pub fn decode_colors(encoded: &[f32]) -> Vec<Option<u8>> {
    encoded
        .chunks(COLORS)
        .map(|row| {
            (0u8..)
                .zip(row.iter())
                .find(|&(_, &v)| v > 0.5)
                .map(|(c, _)| c)
        })
        .collect()
}
