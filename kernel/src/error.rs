//! Typed puzzle errors.

/// Failure to build, parse, or validate a puzzle value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// Cube size outside the supported range.
    #[error("unsupported cube size {size} (supported: {min}..={max})")]
    UnsupportedSize { size: usize, min: usize, max: usize },
    /// Sticker vector length does not match `6 * n * n`.
    #[error("expected {expected} stickers, got {actual}")]
    StickerCount { expected: usize, actual: usize },
    /// A sticker holds a colour outside `0..6`.
    #[error("sticker {index} has invalid colour {value}")]
    InvalidColor { index: usize, value: u8 },
    /// A colour does not appear exactly `n * n` times.
    #[error("colour {color} appears {count} times, expected {expected}")]
    ColorImbalance {
        color: u8,
        count: usize,
        expected: usize,
    },
    /// A move token could not be parsed.
    #[error("unknown move {token:?}")]
    UnknownMove { token: String },
    /// A facelet character is not one of `URFDLB`.
    #[error("invalid facelet character {ch:?} at position {index}")]
    InvalidFacelet { ch: char, index: usize },
}
