//! Faces, quarter turns, and Singmaster-style notation.
//!
//! Only outer-layer quarter turns exist as moves. `X2` in notation expands
//! to two quarter turns so every path length counts quarter turns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// A cube face. Declaration order is the sticker layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    /// All faces in layout order.
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Layout index (also the colour of this face when solved).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Face from its layout index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Face> {
        match index {
            0 => Some(Face::U),
            1 => Some(Face::R),
            2 => Some(Face::F),
            3 => Some(Face::D),
            4 => Some(Face::L),
            5 => Some(Face::B),
            _ => None,
        }
    }

    /// Notation letter.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    /// Face from its notation letter.
    #[must_use]
    pub const fn from_letter(ch: char) -> Option<Face> {
        match ch {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// Outward normal as `(axis, sign)`; axis 0 = x, 1 = y, 2 = z.
    #[must_use]
    pub const fn normal(self) -> (usize, i32) {
        match self {
            Face::U => (1, 1),
            Face::R => (0, 1),
            Face::F => (2, 1),
            Face::D => (1, -1),
            Face::L => (0, -1),
            Face::B => (2, -1),
        }
    }
}

/// Turn direction as seen looking at the face from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// A quarter turn of one outer layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Turn {
    pub face: Face,
    pub direction: Direction,
}

impl Turn {
    #[must_use]
    pub const fn cw(face: Face) -> Self {
        Self {
            face,
            direction: Direction::Clockwise,
        }
    }

    #[must_use]
    pub const fn ccw(face: Face) -> Self {
        Self {
            face,
            direction: Direction::CounterClockwise,
        }
    }

    /// The turn that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        let direction = match self.direction {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        };
        Self {
            face: self.face,
            direction,
        }
    }

    /// All twelve quarter turns: each face clockwise then counter-clockwise.
    #[must_use]
    pub fn all() -> Vec<Turn> {
        Face::ALL
            .iter()
            .flat_map(|&f| [Turn::cw(f), Turn::ccw(f)])
            .collect()
    }

    /// `U`, `R`, `F` quarter turns only. Keeps the DLB corner fixed, which
    /// removes whole-cube rotations from the state space of a 2x2.
    #[must_use]
    pub fn fixed_corner() -> Vec<Turn> {
        [Face::U, Face::R, Face::F]
            .iter()
            .flat_map(|&f| [Turn::cw(f), Turn::ccw(f)])
            .collect()
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Clockwise => write!(f, "{}", self.face.letter()),
            Direction::CounterClockwise => write!(f, "{}'", self.face.letter()),
        }
    }
}

impl FromStr for Turn {
    type Err = PuzzleError;

    /// Parses a single quarter turn (`R` or `R'`). Use [`parse_sequence`]
    /// for half turns.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PuzzleError::UnknownMove {
            token: s.to_string(),
        };
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(unknown)?;
        match chars.as_str() {
            "" => Ok(Turn::cw(face)),
            "'" => Ok(Turn::ccw(face)),
            _ => Err(unknown()),
        }
    }
}

/// Parse whitespace-separated notation into quarter turns.
///
/// `R2` expands to `R R`; `R2'` is accepted as the same half turn.
///
/// # Errors
///
/// Returns [`PuzzleError::UnknownMove`] for any unrecognised token.
pub fn parse_sequence(text: &str) -> Result<Vec<Turn>, PuzzleError> {
    let mut turns = Vec::new();
    for token in text.split_whitespace() {
        if let Some(base) = token
            .strip_suffix("2'")
            .or_else(|| token.strip_suffix('2'))
        {
            let turn: Turn = base.parse().map_err(|_| PuzzleError::UnknownMove {
                token: token.to_string(),
            })?;
            if turn.direction != Direction::Clockwise {
                return Err(PuzzleError::UnknownMove {
                    token: token.to_string(),
                });
            }
            turns.extend([turn, turn]);
        } else {
            turns.push(token.parse()?);
        }
    }
    Ok(turns)
}

/// Render turns as space-separated notation.
#[must_use]
pub fn format_sequence(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
