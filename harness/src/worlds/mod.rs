//! Search worlds the harness can drive.

pub mod cube;
pub mod graph;
