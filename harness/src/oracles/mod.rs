//! Heuristic oracles for the harness worlds.

pub mod mlp;
pub mod stickers;
pub mod table;
