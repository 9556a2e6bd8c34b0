//! Search driver lock tests over explicit graphs: path correctness, the
//! already-solved shortcut, exhaustion semantics, ledger pruning, and error
//! surfacing before any queue work.

use std::sync::atomic::{AtomicUsize, Ordering};

use cubist_harness::oracles::table::TableOracle;
use cubist_harness::worlds::graph::GraphWorld;
use cubist_search::oracle::{HeuristicOracle, OracleError};
use cubist_search::{
    replay_path, search, CancelToken, NoopObserver, SearchError, SearchEvent, SearchPolicy,
    SearchResult, SearchWorld, Termination,
};
use lock_tests::scenarios::{goal_stub_oracle, two_move_graph};

/// Wraps an oracle and counts batches and states.
struct Metered<O> {
    inner: O,
    calls: AtomicUsize,
    states: AtomicUsize,
}

impl<O> Metered<O> {
    fn new(inner: O) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            states: AtomicUsize::new(0),
        }
    }
}

impl<O: HeuristicOracle> HeuristicOracle for Metered<O> {
    fn name(&self) -> &str {
        self.inner.name()
    }
    fn estimate_batch(&self, states: &[Vec<f32>], hint: usize) -> Result<Vec<f32>, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.states.fetch_add(states.len(), Ordering::SeqCst);
        self.inner.estimate_batch(states, hint)
    }
}

fn run(
    world: &GraphWorld,
    start: &str,
    oracle: &dyn HeuristicOracle,
    policy: &SearchPolicy,
) -> Result<SearchResult<String>, SearchError> {
    search(
        start.to_string(),
        world,
        oracle,
        policy,
        &CancelToken::new(),
        &mut NoopObserver,
    )
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[test]
fn two_move_scenario_returns_a_then_b() {
    let world = two_move_graph();
    let oracle = goal_stub_oracle(&world, &["g"]);
    let result = run(&world, "s", &oracle, &SearchPolicy::default()).unwrap();
    assert_eq!(result.termination, Termination::GoalReached);
    assert_eq!(result.path, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn returned_paths_replay_to_a_goal() {
    // A small grid: moves R and D, goal in the far corner.
    let mut world = GraphWorld::new(&["R", "D"]);
    for r in 0..4 {
        for c in 0..4 {
            let here = format!("{r}{c}");
            if c < 3 {
                world = world.edge(&here, "R", &format!("{r}{}", c + 1));
            }
            if r < 3 {
                world = world.edge(&here, "D", &format!("{}{c}", r + 1));
            }
        }
    }
    let world = world.goal("33");
    let oracle = TableOracle::new(vec![], 1.0);
    for start in ["00", "12", "30", "03"] {
        let result = run(&world, start, &oracle, &SearchPolicy::default()).unwrap();
        assert!(result.is_solved(), "no path from {start}");
        let end = replay_path(&world, &start.to_string(), &result.path);
        assert!(world.is_goal(&end), "path from {start} ends at {end}");
    }
}

#[test]
fn start_at_goal_returns_empty_path_and_never_calls_oracle() {
    let world = two_move_graph();
    let oracle = Metered::new(goal_stub_oracle(&world, &["g"]));
    let result = run(&world, "g", &oracle, &SearchPolicy::default()).unwrap();
    assert!(result.is_solved());
    assert!(result.path.is_empty());
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn goal_found_at_generation_skips_that_rounds_oracle_call() {
    let world = GraphWorld::new(&["A"]).edge("s", "A", "g").goal("g");
    let oracle = Metered::new(TableOracle::new(vec![], 1.0));
    let result = run(&world, "s", &oracle, &SearchPolicy::default()).unwrap();
    assert_eq!(result.path, vec!["A".to_string()]);
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Exhaustion and pruning
// ---------------------------------------------------------------------------

#[test]
fn unreachable_goal_exhausts_frontier_after_visiting_everything() {
    let world = GraphWorld::new(&["A", "B"])
        .edge("s", "A", "x")
        .edge("s", "B", "y")
        .edge("x", "B", "y")
        .edge("y", "A", "s")
        .goal("island");
    let oracle = TableOracle::new(vec![], 1.0);
    let result = run(&world, "s", &oracle, &SearchPolicy::default()).unwrap();
    assert_eq!(result.termination, Termination::FrontierExhausted);
    assert!(!result.is_solved());
    assert!(result.path.is_empty());
    assert_eq!(result.stats.expanded, 3, "s, x and y each expanded once");
    assert_eq!(result.stats.ledger_size, 3);
}

#[test]
fn every_state_sent_to_oracle_at_most_once_when_costs_never_improve() {
    // Two routes to `j`, both of length 2: the second is dropped by the ledger.
    let world = GraphWorld::new(&["A", "B"])
        .edge("s", "A", "p")
        .edge("s", "B", "q")
        .edge("p", "A", "j")
        .edge("q", "A", "j")
        .goal("island");
    let oracle = Metered::new(TableOracle::new(vec![], 1.0));
    let result = run(&world, "s", &oracle, &SearchPolicy::default()).unwrap();
    assert_eq!(result.termination, Termination::FrontierExhausted);
    // p, q, then j once.
    assert_eq!(oracle.states.load(Ordering::SeqCst), 3);
    assert!(result.stats.duplicates > 0);
}

#[test]
fn stale_entries_are_skipped_when_a_shorter_path_arrives_later() {
    // Greedy search (λ = 0) reaches `t` first by the long way round because
    // the oracle favours `a1`. The short route through `b` then re-admits
    // `t` at a lower cost; the long-way entry surfaces first and is skipped.
    let world = GraphWorld::new(&["A", "B"])
        .edge("s", "A", "a1")
        .edge("s", "B", "b")
        .edge("a1", "A", "a2")
        .edge("a2", "A", "t")
        .edge("b", "A", "t")
        .edge("t", "A", "g")
        .goal("g");
    let mut values = vec![5.0; world.node_count()];
    for (node, h) in [("a1", 0.0), ("a2", 0.0), ("b", 1.0), ("t", 2.0)] {
        values[world.index_of(node).unwrap()] = h;
    }
    let oracle = TableOracle::new(values, 5.0);
    let policy = SearchPolicy {
        round_size: 1,
        path_weight: 0.0,
        ..SearchPolicy::default()
    };
    let result = run(&world, "s", &oracle, &policy).unwrap();
    assert!(result.is_solved());
    assert_eq!(result.path, vec!["B", "A", "A"]);
    assert_eq!(result.stats.stale_skipped, 1);
}

// ---------------------------------------------------------------------------
// Errors and events
// ---------------------------------------------------------------------------

#[test]
fn unknown_start_state_is_malformed_input() {
    let world = two_move_graph();
    let oracle = Metered::new(goal_stub_oracle(&world, &["g"]));
    let err = run(&world, "nowhere", &oracle, &SearchPolicy::default()).unwrap_err();
    assert!(matches!(err, SearchError::MalformedInput(_)));
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn short_oracle_reply_is_an_error() {
    struct Short;
    impl HeuristicOracle for Short {
        fn name(&self) -> &str {
            "short"
        }
        fn estimate_batch(&self, states: &[Vec<f32>], _: usize) -> Result<Vec<f32>, OracleError> {
            Ok(vec![0.0; states.len().saturating_sub(1)])
        }
    }
    let world = two_move_graph();
    let err = run(&world, "s", &Short, &SearchPolicy::default()).unwrap_err();
    assert_eq!(
        err,
        SearchError::Oracle(OracleError::ArityMismatch {
            expected: 2,
            actual: 1
        })
    );
}

#[test]
fn progress_events_carry_expanded_estimates() {
    let world = two_move_graph();
    let oracle = goal_stub_oracle(&world, &["g"]);
    let mut estimates = Vec::new();
    let mut observer = |event: &SearchEvent| {
        if let SearchEvent::Progress { estimate, path_cost } = event {
            assert!(*path_cost > 0);
            estimates.push(*estimate);
        }
    };
    let result = search(
        "s".to_string(),
        &world,
        &oracle,
        &SearchPolicy::default(),
        &CancelToken::new(),
        &mut observer,
    )
    .unwrap();
    assert!(result.is_solved());
    // `m` is expanded (and yields the goal); root is never reported.
    assert_eq!(estimates.first(), Some(&1.0));
    assert!(!estimates.is_empty());
}
