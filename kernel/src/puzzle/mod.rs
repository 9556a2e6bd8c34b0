//! NxN cube puzzle: state, geometry, moves, scrambles, and encodings.

pub mod cube;
pub mod encode;
pub mod geometry;
pub mod moves;
pub mod scramble;
