//! Search entry point and expansion loop.
//!
//! Weighted best-first search with batched heuristic evaluation:
//!
//! ```text
//! validate policy + start state
//!   → start is goal? return []
//!   → seed queue (priority 0) + ledger (cost 0)
//!   → per round: pop ≤ N nodes → expand every move → dedup via ledger
//!                → goal? return path
//!                → one oracle call for the round's survivors
//!                → insert with λ·g + h
//!   → queue empty: FrontierExhausted
//! ```

use serde::Serialize;

use crate::cancel::CancelToken;
use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::ledger::VisitedLedger;
use crate::node::SearchNode;
use crate::oracle::{check_estimates, HeuristicOracle};
use crate::policy::SearchPolicy;
use crate::queue::PriorityQueue;

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A goal state was reached; `path` leads to it (empty if the start was solved).
    GoalReached,
    /// Every reachable state not pruned by the ledger was expanded.
    FrontierExhausted,
    /// `max_expansions` was hit before a goal was found.
    ExpansionBudgetExceeded,
    /// The cancel token was set; observed at a round boundary.
    Cancelled,
}

/// Counters for one search invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Rounds started.
    pub rounds: u64,
    /// Nodes popped and expanded.
    pub expanded: u64,
    /// Successor states generated (before dedup).
    pub generated: u64,
    /// Successors dropped because the ledger held an equal or cheaper path.
    pub duplicates: u64,
    /// Popped nodes skipped because a cheaper path to their state was found later.
    pub stale_skipped: u64,
    /// Oracle batch calls issued.
    pub oracle_calls: u64,
    /// States sent to the oracle in total.
    pub oracle_states: u64,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
    /// Distinct states recorded in the ledger at termination.
    pub ledger_size: usize,
}

/// Outcome of a search that ran to a normal termination.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Moves from the start to the goal. Empty unless `termination` is
    /// [`Termination::GoalReached`].
    pub path: Vec<M>,
    pub termination: Termination,
    pub stats: SearchStats,
}

impl<M> SearchResult<M> {
    /// `true` if the search ended at a goal state.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.termination == Termination::GoalReached
    }
}

/// Observable events, in the order the driver produces them.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// A node with a non-empty path is about to be expanded.
    Progress { estimate: f64, path_cost: u32 },
    /// A round finished and its survivors are queued.
    RoundCompleted {
        round: u64,
        frontier: usize,
        ledger: usize,
    },
}

/// Receives [`SearchEvent`]s. Observers cannot influence the search.
pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent);
}

impl<F: FnMut(&SearchEvent)> SearchObserver for F {
    fn on_event(&mut self, event: &SearchEvent) {
        self(event);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Run weighted best-first search from `initial`.
///
/// The queue and ledger are private to this call and dropped when it
/// returns. Exhausting the frontier, the expansion budget, or being
/// cancelled is a normal `Ok` result with an empty path.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] before any work if `policy` is unusable.
/// - [`SearchError::MalformedInput`] before any queue work if the world
///   rejects `initial`.
/// - [`SearchError::Oracle`] if an oracle batch fails or returns a malformed
///   reply. The batch is not retried.
pub fn search<W: SearchWorld>(
    initial: W::State,
    world: &W,
    oracle: &dyn HeuristicOracle,
    policy: &SearchPolicy,
    cancel: &CancelToken,
    observer: &mut dyn SearchObserver,
) -> Result<SearchResult<W::Move>, SearchError> {
    policy.validate()?;
    world.validate(&initial)?;

    let mut stats = SearchStats::default();

    if world.is_goal(&initial) {
        tracing::info!("start state already satisfies the goal");
        return Ok(SearchResult {
            path: Vec::new(),
            termination: Termination::GoalReached,
            stats,
        });
    }

    let mut ledger: VisitedLedger<W::Key> = VisitedLedger::new();
    let mut queue: PriorityQueue<(W::Key, SearchNode<W::State, W::Move>)> = PriorityQueue::new();

    let root_key = world.fingerprint(&initial);
    ledger.seed(root_key.clone());
    queue.insert(0.0, (root_key, SearchNode::root(initial)));
    stats.peak_frontier = 1;

    let termination = loop {
        if queue.is_empty() {
            break Termination::FrontierExhausted;
        }
        if cancel.is_cancelled() {
            break Termination::Cancelled;
        }
        if budget_spent(policy, &stats) {
            break Termination::ExpansionBudgetExceeded;
        }

        stats.rounds += 1;
        let round_size = policy.round_size.min(queue.len());
        let mut survivors: Vec<(W::Key, SearchNode<W::State, W::Move>)> = Vec::new();

        for _ in 0..round_size {
            if budget_spent(policy, &stats) {
                break;
            }
            let Some((key, node)) = queue.extract_min() else {
                continue;
            };
            if ledger.is_stale(&key, node.path_cost()) {
                stats.stale_skipped += 1;
                continue;
            }

            stats.expanded += 1;
            if node.path_cost() > 0 {
                observer.on_event(&SearchEvent::Progress {
                    estimate: node.heuristic(),
                    path_cost: node.path_cost(),
                });
            }

            let child_cost = node.path_cost() + 1;
            for mv in world.moves() {
                let next = world.apply(node.state(), mv);
                stats.generated += 1;

                let child_key = world.fingerprint(&next);
                if !ledger.admit(child_key.clone(), child_cost) {
                    stats.duplicates += 1;
                    continue;
                }

                let child = node.child(next, mv.clone());
                if world.is_goal(child.state()) {
                    stats.ledger_size = ledger.len();
                    tracing::info!(
                        moves = child.path_cost(),
                        rounds = stats.rounds,
                        expanded = stats.expanded,
                        oracle_calls = stats.oracle_calls,
                        "goal reached"
                    );
                    return Ok(SearchResult {
                        path: child.path().to_vec(),
                        termination: Termination::GoalReached,
                        stats,
                    });
                }
                survivors.push((child_key, child));
            }
        }

        if !survivors.is_empty() {
            let encoded: Vec<Vec<f32>> = survivors
                .iter()
                .map(|(_, node)| world.encode(node.state()))
                .collect();
            stats.oracle_calls += 1;
            stats.oracle_states += encoded.len() as u64;

            let estimates = oracle
                .estimate_batch(&encoded, policy.batch_size)
                .and_then(|raw| check_estimates(encoded.len(), raw))
                .map_err(|e| {
                    tracing::warn!(
                        oracle = oracle.name(),
                        batch = encoded.len(),
                        error = %e,
                        "oracle batch failed"
                    );
                    e
                })?;

            for ((key, node), h) in survivors.into_iter().zip(estimates) {
                let node = node.with_heuristic(h);
                queue.insert(node.priority(policy.path_weight), (key, node));
            }
            stats.peak_frontier = stats.peak_frontier.max(queue.len());
        }

        tracing::debug!(
            round = stats.rounds,
            frontier = queue.len(),
            ledger = ledger.len(),
            best_priority = queue.peek_priority(),
            "round complete"
        );
        observer.on_event(&SearchEvent::RoundCompleted {
            round: stats.rounds,
            frontier: queue.len(),
            ledger: ledger.len(),
        });
    };

    stats.ledger_size = ledger.len();
    tracing::info!(
        termination = ?termination,
        rounds = stats.rounds,
        expanded = stats.expanded,
        ledger = stats.ledger_size,
        "search ended without reaching the goal"
    );
    Ok(SearchResult {
        path: Vec::new(),
        termination,
        stats,
    })
}

fn budget_spent(policy: &SearchPolicy, stats: &SearchStats) -> bool {
    policy
        .max_expansions
        .is_some_and(|max| stats.expanded >= max)
}

/// Apply `path` to `initial` move by move.
///
/// Used to check that a returned path actually leads to a goal.
pub fn replay_path<W: SearchWorld>(world: &W, initial: &W::State, path: &[W::Move]) -> W::State {
    path.iter()
        .fold(initial.clone(), |state, mv| world.apply(&state, mv))
}
