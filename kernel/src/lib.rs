//! Cubist Kernel: the deterministic puzzle carrier.
//!
//! # API Surface
//!
//! - [`puzzle::cube::CubeState`] -- NxN sticker state, goal test, validation
//! - [`puzzle::geometry::Geometry`] -- per-size turn permutations derived from 3D rotations
//! - [`puzzle::moves`] -- faces, quarter turns, notation
//! - [`puzzle::encode::one_hot`] -- estimator input encoding
//! - [`digest::hash::canonical_hash`] -- domain-separated SHA-256 fingerprints
//!
//! # Module Dependency Direction
//!
//! `digest` ← `puzzle`
//!
//! One-way only. The kernel knows nothing about search.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod digest;
pub mod error;
pub mod puzzle;

pub use error::PuzzleError;
