//! Solver service: runs searches off the caller's thread.
//!
//! A dedicated blocking task owns the world and the oracle provider and
//! processes solve requests one at a time, in submission order. Each request
//! gets its own response stream:
//!
//! ```text
//! Progress { estimate }*  then exactly one of
//! Solved { path } | NotFound | Cancelled | Error { kind, message }
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let handle = spawn_solver_service(world, provider, SearchPolicy::default());
//! let mut session = handle.submit(scrambled).await?;
//! while let Some(msg) = session.next().await {
//!     if msg.is_terminal() { /* done */ }
//! }
//! ```
//!
//! Progress travels on a bounded stream and is dropped when the requester
//! falls behind. The terminal message has its own one-shot slot, so a slow
//! reader never stalls the service and still gets exactly one terminal.
//!
//! The oracle is acquired once per request and dropped before the terminal
//! message is sent, on every exit path. When every [`SolverHandle`] clone is
//! dropped the service task exits.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use cubist_search::{
    search, CancelToken, OracleError, OracleProvider, SearchError, SearchEvent, SearchPolicy,
    SearchWorld, Termination,
};

/// Job queue depth. Submitters wait when it is full.
const QUEUE_DEPTH: usize = 64;

/// Buffered progress messages per request. Further progress is dropped
/// until the requester reads.
const PROGRESS_DEPTH: usize = 256;

/// A request to solve from `initial_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest<S> {
    pub initial_state: S,
}

/// Classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The oracle provider could not produce an oracle.
    OracleUnavailable,
    /// The start state was rejected by the world.
    MalformedInput,
    /// The oracle failed or replied with a malformed batch mid-search.
    OracleFailure,
    /// The service's search policy is unusable.
    InvalidPolicy,
    /// The search panicked. The service keeps running.
    Internal,
}

impl ErrorKind {
    fn of(err: &SearchError) -> Self {
        match err {
            SearchError::InvalidPolicy { .. } => ErrorKind::InvalidPolicy,
            SearchError::MalformedInput(_) => ErrorKind::MalformedInput,
            SearchError::Oracle(OracleError::Unavailable { .. }) => ErrorKind::OracleUnavailable,
            SearchError::Oracle(_) => ErrorKind::OracleFailure,
        }
    }
}

/// A message on a request's response stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolveResponse<M> {
    /// Heuristic estimate of a node being expanded. Best effort.
    Progress { estimate: f64 },
    /// Moves from the submitted state to a goal. Empty if it was already solved.
    Solved { path: Vec<M> },
    /// The search ended without reaching a goal.
    NotFound,
    /// The request's cancel token was observed.
    Cancelled,
    Error { kind: ErrorKind, message: String },
}

impl<M> SolveResponse<M> {
    /// `true` for every message except `Progress`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SolveResponse::Progress { .. })
    }

    fn error(kind: ErrorKind, message: impl ToString) -> Self {
        SolveResponse::Error {
            kind,
            message: message.to_string(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SolveResponse::Progress { .. } => "progress",
            SolveResponse::Solved { .. } => "solved",
            SolveResponse::NotFound => "not_found",
            SolveResponse::Cancelled => "cancelled",
            SolveResponse::Error { .. } => "error",
        }
    }
}

/// Failure to talk to the solver service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerError {
    #[error("solver service has shut down")]
    ServiceClosed,
    #[error("response stream ended without a terminal message")]
    Disconnected,
}

struct Job<S, M> {
    id: u64,
    request: SolveRequest<S>,
    cancel: CancelToken,
    progress: mpsc::Sender<SolveResponse<M>>,
    terminal: oneshot::Sender<SolveResponse<M>>,
}

/// Cloneable handle for submitting requests to the solver service.
pub struct SolverHandle<S, M> {
    tx: mpsc::Sender<Job<S, M>>,
    next_id: std::sync::Arc<std::sync::atomic::AtomicU64>,
}

impl<S, M> Clone for SolverHandle<S, M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl<S, M> SolverHandle<S, M> {
    /// Queue a solve from `initial_state`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::ServiceClosed`] if the service task is gone.
    pub async fn submit(&self, initial_state: S) -> Result<SolveSession<M>, WorkerError> {
        self.submit_with_cancel(initial_state, CancelToken::new())
            .await
    }

    /// Queue a solve that stops when `cancel` is set, e.g. a token shared
    /// by several requests.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::ServiceClosed`] if the service task is gone.
    pub async fn submit_with_cancel(
        &self,
        initial_state: S,
        cancel: CancelToken,
    ) -> Result<SolveSession<M>, WorkerError> {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let (progress_tx, progress) = mpsc::channel(PROGRESS_DEPTH);
        let (terminal_tx, terminal) = oneshot::channel();
        self.tx
            .send(Job {
                id,
                request: SolveRequest { initial_state },
                cancel: cancel.clone(),
                progress: progress_tx,
                terminal: terminal_tx,
            })
            .await
            .map_err(|_| WorkerError::ServiceClosed)?;
        Ok(SolveSession {
            id,
            progress,
            terminal: Some(terminal),
            cancel,
        })
    }
}

/// The response stream of one submitted request.
pub struct SolveSession<M> {
    id: u64,
    progress: mpsc::Receiver<SolveResponse<M>>,
    terminal: Option<oneshot::Receiver<SolveResponse<M>>>,
    cancel: CancelToken,
}

impl<M> SolveSession<M> {
    /// Service-assigned request number, as it appears in log lines.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Next message, or `None` once the terminal message has been taken.
    ///
    /// Cancel-safe: a message is never lost when the future is dropped, so
    /// this can sit in a `tokio::select!` loop.
    pub async fn next(&mut self) -> Option<SolveResponse<M>> {
        // The service drops the progress sender before sending the terminal.
        if let Some(msg) = self.progress.recv().await {
            return Some(msg);
        }
        let terminal = self.terminal.as_mut()?;
        let msg = terminal.await.ok();
        self.terminal = None;
        msg
    }

    /// Ask the search to stop at its next round boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Skip progress messages and return the terminal one.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Disconnected`] if the stream closes first.
    pub async fn finish(mut self) -> Result<SolveResponse<M>, WorkerError> {
        self.progress.close();
        let terminal = self.terminal.take().ok_or(WorkerError::Disconnected)?;
        terminal.await.map_err(|_| WorkerError::Disconnected)
    }
}

/// Spawn the solver service, returning a cloneable handle.
///
/// Must be called from within a tokio runtime. Searches run on the blocking
/// thread pool, one at a time.
pub fn spawn_solver_service<W>(
    world: W,
    provider: Box<dyn OracleProvider>,
    policy: SearchPolicy,
) -> SolverHandle<W::State, W::Move>
where
    W: SearchWorld + Send + 'static,
    W::State: Send + 'static,
    W::Move: Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Job<W::State, W::Move>>(QUEUE_DEPTH);

    tokio::task::spawn_blocking(move || {
        while let Some(job) = rx.blocking_recv() {
            let span = tracing::info_span!("solve", request = job.id);
            let _entered = span.enter();
            tracing::info!("solve request received");

            let terminal = run_job(
                &world,
                provider.as_ref(),
                &policy,
                job.request,
                &job.cancel,
                &job.progress,
            );
            tracing::info!(outcome = terminal.label(), "solve request finished");
            drop(job.progress);
            // The requester may have stopped listening.
            let _ = job.terminal.send(terminal);
        }
        tracing::debug!("solver service shut down (all handles dropped)");
    });

    SolverHandle {
        tx,
        next_id: std::sync::Arc::default(),
    }
}

fn run_job<W: SearchWorld>(
    world: &W,
    provider: &dyn OracleProvider,
    policy: &SearchPolicy,
    request: SolveRequest<W::State>,
    cancel: &CancelToken,
    progress: &mpsc::Sender<SolveResponse<W::Move>>,
) -> SolveResponse<W::Move> {
    if let Err(e) = policy.validate() {
        return SolveResponse::error(ErrorKind::InvalidPolicy, e);
    }
    if let Err(e) = world.validate(&request.initial_state) {
        return SolveResponse::error(ErrorKind::MalformedInput, SearchError::from(e));
    }

    let oracle = match provider.acquire() {
        Ok(oracle) => oracle,
        Err(e) => {
            tracing::warn!(error = %e, "could not acquire heuristic oracle");
            return SolveResponse::error(ErrorKind::OracleUnavailable, e);
        }
    };

    let mut forward = |event: &SearchEvent| {
        if let SearchEvent::Progress { estimate, .. } = event {
            // Full or closed: progress is best effort.
            let _ = progress.try_send(SolveResponse::Progress {
                estimate: *estimate,
            });
        }
    };
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        search(
            request.initial_state,
            world,
            oracle.as_ref(),
            policy,
            cancel,
            &mut forward,
        )
    }));
    drop(oracle);

    match outcome {
        Ok(Ok(result)) => match result.termination {
            Termination::GoalReached => SolveResponse::Solved { path: result.path },
            Termination::FrontierExhausted | Termination::ExpansionBudgetExceeded => {
                SolveResponse::NotFound
            }
            Termination::Cancelled => SolveResponse::Cancelled,
        },
        Ok(Err(e)) => {
            if matches!(e, SearchError::Oracle(_)) {
                tracing::warn!(error = %e, "search aborted by oracle failure");
            }
            SolveResponse::error(ErrorKind::of(&e), e)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(panic = %message, "search panicked");
            SolveResponse::error(ErrorKind::Internal, message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "search panicked".to_string()
    }
}
