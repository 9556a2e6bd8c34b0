//! Canonical search scenarios.
//!
//! Each scenario is built the same way by the in-process tests and by the
//! `solve_fixture` binary, so cross-process runs can be compared line by line.

use cubist_harness::oracles::stickers::StickerOracle;
use cubist_harness::oracles::table::TableOracle;
use cubist_harness::worlds::cube::{CubeWorld, MoveSet};
use cubist_harness::worlds::graph::GraphWorld;
use cubist_kernel::digest::hash::{canonical_hash, HashDomain};
use cubist_kernel::puzzle::moves::format_sequence;
use cubist_kernel::puzzle::scramble::scramble;
use cubist_search::{search, CancelToken, NoopObserver, SearchPolicy, SearchResult, SearchWorld};

/// Start `s`, goal `g`, moves `A` and `B`. Only `A` then `B` reaches the goal:
///
/// ```text
/// s --A--> m --B--> g
/// s --B--> d        (dead end; every move from d stays at d)
/// ```
#[must_use]
pub fn two_move_graph() -> GraphWorld {
    GraphWorld::new(&["A", "B"])
        .edge("s", "A", "m")
        .edge("s", "B", "d")
        .edge("m", "B", "g")
        .goal("g")
}

/// Stub oracle for a [`GraphWorld`]: `0` at goal nodes, `1` everywhere else.
#[must_use]
pub fn goal_stub_oracle(world: &GraphWorld, goals: &[&str]) -> TableOracle {
    let mut values = vec![1.0; world.node_count()];
    for goal in goals {
        if let Some(i) = world.index_of(goal) {
            values[i] = 0.0;
        }
    }
    TableOracle::new(values, 1.0)
}

/// Parameters of a seeded cube solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeScenario {
    pub size: usize,
    pub move_set: MoveSet,
    pub scramble_length: usize,
    pub seed: u64,
}

impl Default for CubeScenario {
    fn default() -> Self {
        Self {
            size: 2,
            move_set: MoveSet::FixedCorner,
            scramble_length: 6,
            seed: 11,
        }
    }
}

/// Everything a cube scenario run prints, in print order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeReport {
    pub scramble: String,
    pub start_fingerprint: String,
    pub termination: String,
    pub solution: String,
    pub solution_moves: usize,
    pub replay_solved: bool,
    pub expanded: u64,
    pub oracle_calls: u64,
    pub policy_digest: String,
}

impl CubeReport {
    /// `key=value` lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("scramble={}", self.scramble),
            format!("start_fingerprint={}", self.start_fingerprint),
            format!("termination={}", self.termination),
            format!("solution={}", self.solution),
            format!("solution_moves={}", self.solution_moves),
            format!("replay_solved={}", self.replay_solved),
            format!("expanded={}", self.expanded),
            format!("oracle_calls={}", self.oracle_calls),
            format!("policy_digest={}", self.policy_digest),
        ]
    }
}

/// Scramble, solve with the sticker oracle, and summarise.
///
/// # Panics
///
/// Panics if the scenario is malformed or the search fails; fixtures only.
#[must_use]
pub fn run_cube_scenario(scenario: CubeScenario, policy: &SearchPolicy) -> CubeReport {
    let world = CubeWorld::new(scenario.size, scenario.move_set).expect("valid cube size");
    let turns = scramble(&scenario.move_set.turns(), scenario.scramble_length, scenario.seed);
    let start = world.scrambled(&turns).expect("scramble applies");
    let oracle = StickerOracle::for_geometry(world.geometry());

    let result: SearchResult<_> = search(
        start.clone(),
        &world,
        &oracle,
        policy,
        &CancelToken::new(),
        &mut NoopObserver,
    )
    .expect("search runs");

    let end = cubist_search::replay_path(&world, &start, &result.path);
    let policy_bytes = policy.to_json_bytes().expect("policy serialises");
    CubeReport {
        scramble: format_sequence(&turns),
        start_fingerprint: world.fingerprint(&start).as_str().to_string(),
        termination: serde_json::to_string(&result.termination).expect("termination serialises"),
        solution: format_sequence(&result.path),
        solution_moves: result.path.len(),
        replay_solved: world.is_goal(&end),
        expanded: result.stats.expanded,
        oracle_calls: result.stats.oracle_calls,
        policy_digest: canonical_hash(HashDomain::SearchPolicy, &policy_bytes)
            .as_str()
            .to_string(),
    }
}
