//! Seeded random scrambles.

use crate::puzzle::moves::Turn;

/// Draw `length` turns from `moves` with a seeded RNG.
///
/// Never emits the inverse of the previous turn, so a scramble of length
/// `k` does not trivially cancel down. Same `(moves, length, seed)` always
/// gives the same sequence.
#[must_use]
pub fn scramble(moves: &[Turn], length: usize, seed: u64) -> Vec<Turn> {
    if moves.is_empty() {
        return Vec::new();
    }
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut out: Vec<Turn> = Vec::with_capacity(length);
    while out.len() < length {
        let candidate = moves[rng.usize(..moves.len())];
        if out.last().is_some_and(|prev| prev.inverse() == candidate) {
            continue;
        }
        out.push(candidate);
    }
    out
}
