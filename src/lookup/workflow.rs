//! Async driver for the nth-prime lookup.
//!
//! At most one lookup is outstanding per workflow. The phase lock is always
//! taken before the `AppState` lock, and a response is only published while
//! holding the phase lock, so a discarded workflow can never write a stale
//! result.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::mvi::Reducer;
use crate::prime::{LookupError, PrimeLookup};
use crate::state::AppState;

use super::intent::LookupIntent;
use super::reducer::LookupReducer;
use super::state::LookupPhase;

/// Why a started lookup produced no result.
#[derive(Debug, Error)]
pub enum LookupFailure {
    /// The service call failed. Not retried.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The workflow was discarded before the response arrived.
    #[error("Lookup cancelled")]
    Cancelled,

    /// The lookup task ended without producing a response.
    #[error("Lookup aborted before the service answered")]
    Aborted,
}

/// Result of asking the workflow to start a lookup.
#[derive(Debug)]
pub enum RequestOutcome {
    /// A new lookup is running.
    Started(LookupHandle),

    /// A lookup is already outstanding; nothing was started.
    AlreadyPending { for_count: i64 },
}

/// Awaitable completion of one lookup.
#[derive(Debug)]
pub struct LookupHandle {
    for_count: i64,
    receiver: oneshot::Receiver<Result<Option<i64>, LookupFailure>>,
}

impl LookupHandle {
    /// The `n` this lookup was started for.
    pub fn for_count(&self) -> i64 {
        self.for_count
    }

    /// Wait for the lookup to finish.
    ///
    /// The result has already been published to `AppState` when this returns.
    pub async fn wait(self) -> Result<Option<i64>, LookupFailure> {
        self.receiver.await.unwrap_or(Err(LookupFailure::Cancelled))
    }
}

struct WorkflowShared {
    phase: LookupPhase,
    /// Identifies the lookup the current phase belongs to.
    ticket: u64,
    discarded: bool,
    task: Option<JoinHandle<()>>,
}

/// Single-flight lookup of the nth prime, publishing into `AppState`.
///
/// Must be used inside a Tokio runtime. Dropping the workflow cancels any
/// outstanding lookup; a late response is discarded without touching state.
pub struct NthPrimeWorkflow {
    state: AppState,
    lookup: Arc<dyn PrimeLookup>,
    shared: Arc<Mutex<WorkflowShared>>,
}

impl NthPrimeWorkflow {
    pub fn new(state: AppState, lookup: Arc<dyn PrimeLookup>) -> Self {
        Self {
            state,
            lookup,
            shared: Arc::new(Mutex::new(WorkflowShared {
                phase: LookupPhase::Idle,
                ticket: 0,
                discarded: false,
                task: None,
            })),
        }
    }

    /// Current phase of the lookup.
    pub fn phase(&self) -> LookupPhase {
        self.shared.lock().phase.clone()
    }

    /// Whether a new request would be accepted.
    pub fn is_request_enabled(&self) -> bool {
        self.shared.lock().phase.accepts_requests()
    }

    /// Look up the prime at the current count.
    pub fn request_for_count(&self) -> RequestOutcome {
        let n = self.state.count();
        self.request(n)
    }

    /// Start looking up the `n`th prime.
    ///
    /// Rejected with [`RequestOutcome::AlreadyPending`] while a lookup is outstanding.
    pub fn request(&self, n: i64) -> RequestOutcome {
        let mut shared = self.shared.lock();

        if let Some(for_count) = shared.phase.pending_count() {
            tracing::debug!(requested = n, for_count, "Lookup already pending, request rejected");
            return RequestOutcome::AlreadyPending { for_count };
        }

        shared.phase = LookupReducer::reduce(shared.phase.clone(), LookupIntent::Request { n });
        shared.ticket = shared.ticket.wrapping_add(1);
        let ticket = shared.ticket;

        tracing::info!(n, ticket, "Nth prime lookup started");

        let (sender, receiver) = oneshot::channel();
        let lookup = Arc::clone(&self.lookup);
        let mut completion = Completion {
            shared: Arc::clone(&self.shared),
            state: self.state.clone(),
            ticket,
            sender: Some(sender),
        };

        // Spawn outside the lock: a dropped `Completion` takes it.
        drop(shared);
        let task = tokio::spawn(async move {
            let response = lookup.fetch_nth_prime(n).await;
            completion.complete(response);
        });

        let mut shared = self.shared.lock();
        if shared.ticket == ticket && shared.phase.is_in_flight() {
            shared.task = Some(task);
        }
        drop(shared);

        RequestOutcome::Started(LookupHandle {
            for_count: n,
            receiver,
        })
    }
}

impl Drop for NthPrimeWorkflow {
    fn drop(&mut self) {
        let task = {
            let mut shared = self.shared.lock();
            shared.discarded = true;
            shared.task.take()
        };
        // Aborting may drop the task's `Completion`, which takes the phase lock.
        if let Some(task) = task {
            tracing::debug!("Workflow discarded, cancelling lookup");
            task.abort();
        }
    }
}

/// Publishes the outcome of one lookup task.
///
/// If the task ends without a response (the lookup panicked or the task was
/// aborted), dropping this returns the phase to `Idle` unless the lookup is
/// already stale.
struct Completion {
    shared: Arc<Mutex<WorkflowShared>>,
    state: AppState,
    ticket: u64,
    sender: Option<oneshot::Sender<Result<Option<i64>, LookupFailure>>>,
}

impl Completion {
    fn complete(&mut self, response: Result<i64, LookupError>) {
        let outcome = finish(&self.shared, &self.state, self.ticket, response);
        if let Some(sender) = self.sender.take() {
            // The handle may have been dropped by an uninterested caller.
            let _ = sender.send(outcome);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        let Some(sender) = self.sender.take() else {
            return;
        };
        let outcome = abandon(&self.shared, &self.state, self.ticket);
        let _ = sender.send(outcome);
    }
}

/// Apply a service response, unless it is stale.
fn finish(
    shared: &Mutex<WorkflowShared>,
    state: &AppState,
    ticket: u64,
    response: Result<i64, LookupError>,
) -> Result<Option<i64>, LookupFailure> {
    let mut shared = shared.lock();

    if shared.discarded || shared.ticket != ticket {
        tracing::debug!(ticket, "Dropping late lookup response");
        return Err(LookupFailure::Cancelled);
    }
    shared.task = None;

    match response {
        Ok(value) => {
            let result = Some(value);
            shared.phase =
                LookupReducer::reduce(shared.phase.clone(), LookupIntent::Resolve { value: result });
            state.set_pending_prime_result(result);
            shared.phase = LookupReducer::reduce(shared.phase.clone(), LookupIntent::Acknowledge);
            tracing::info!(ticket, value, "Nth prime lookup completed");
            Ok(result)
        }
        Err(error) => {
            shared.phase = LookupReducer::reduce(shared.phase.clone(), LookupIntent::Fail);
            state.set_pending_prime_result(None);
            tracing::warn!(ticket, error = %error, "Nth prime lookup failed");
            Err(LookupFailure::Lookup(error))
        }
    }
}

/// Return a lookup that ended without a response to `Idle`, unless it is stale.
fn abandon(
    shared: &Mutex<WorkflowShared>,
    state: &AppState,
    ticket: u64,
) -> Result<Option<i64>, LookupFailure> {
    let mut shared = shared.lock();

    if shared.discarded || shared.ticket != ticket || !shared.phase.is_in_flight() {
        return Err(LookupFailure::Cancelled);
    }
    shared.task = None;

    shared.phase = LookupReducer::reduce(shared.phase.clone(), LookupIntent::Fail);
    state.set_pending_prime_result(None);
    tracing::warn!(ticket, "Nth prime lookup ended without a response");
    Err(LookupFailure::Aborted)
}
