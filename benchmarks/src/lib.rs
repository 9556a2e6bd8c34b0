//! Shared helpers for cubist benchmark suites.

use cubist_harness::oracles::stickers::StickerOracle;
use cubist_harness::worlds::cube::{CubeWorld, MoveSet};
use cubist_kernel::puzzle::cube::CubeState;
use cubist_kernel::puzzle::moves::Turn;
use cubist_kernel::puzzle::scramble::scramble;
use cubist_search::{search, CancelToken, NoopObserver, SearchPolicy, SearchResult};

/// A scrambled cube with everything needed to search it.
pub struct SolveSetup {
    pub world: CubeWorld,
    pub start: CubeState,
    pub oracle: StickerOracle,
}

/// Build a seeded solve once so benchmarks time only `search()`.
///
/// # Panics
///
/// Panics if `size` is unsupported. Benchmark setup failures are fatal.
#[must_use]
pub fn prepare_solve(size: usize, move_set: MoveSet, length: usize, seed: u64) -> SolveSetup {
    let world = CubeWorld::new(size, move_set).expect("supported cube size");
    let turns = scramble(&move_set.turns(), length, seed);
    let start = world.scrambled(&turns).expect("scramble applies");
    let oracle = StickerOracle::for_geometry(world.geometry());
    SolveSetup {
        world,
        start,
        oracle,
    }
}

/// Run the driver on a prepared setup.
///
/// # Panics
///
/// Panics if the search returns an error.
#[must_use]
pub fn run_solve(setup: &SolveSetup, policy: &SearchPolicy) -> SearchResult<Turn> {
    search(
        setup.start.clone(),
        &setup.world,
        &setup.oracle,
        policy,
        &CancelToken::new(),
        &mut NoopObserver,
    )
    .expect("search runs")
}
