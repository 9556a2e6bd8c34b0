//! Cubist Harness: concrete worlds, oracles and the solver service.
//!
//! The search core in `cubist_search` knows nothing about cubes. This crate
//! binds it to the kernel's puzzle carrier:
//!
//! - [`worlds`]: `SearchWorld` implementations (the cube, plus an explicit
//!   transition-table world for fixtures)
//! - [`oracles`]: heuristic estimators (sticker count, dense network, lookup table)
//! - [`config`]: the JSON solver configuration file
//! - [`worker`]: the message-passing service that runs searches off the
//!   caller's thread
//!
//! The harness does NOT implement search logic. It delegates to `cubist_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod oracles;
pub mod worker;
pub mod worlds;
