//! Domain-separated content hashing for puzzle states and artifacts.

pub mod hash;
pub mod hash_domain;
