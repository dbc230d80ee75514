//! FIFO of callers suspended on an in-flight refresh.

use std::collections::VecDeque;

use tokio::sync::oneshot;

use super::error::AuthError;

/// Outcome delivered to a suspended caller when its refresh cycle settles.
pub type RefreshOutcome = Result<(), AuthError>;

/// Receiving half handed back to an enqueued caller.
pub type Waiter = oneshot::Receiver<RefreshOutcome>;

/// Ordered set of pending requests waiting on one refresh cycle.
///
/// Draining consumes the queue, so an entry can only ever be resolved once.
/// Callers that enqueue after a drain land in a fresh queue.
#[derive(Debug, Default)]
pub struct WaiterQueue {
    pending: VecDeque<oneshot::Sender<RefreshOutcome>>,
}

impl WaiterQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Append a waiter and return the handle it will be resolved through.
    pub fn enqueue(&mut self) -> Waiter {
        let (tx, rx) = oneshot::channel();
        self.pending.push_back(tx);
        rx
    }

    /// Take the whole queue, leaving it empty.
    pub fn take(&mut self) -> WaiterQueue {
        WaiterQueue {
            pending: std::mem::take(&mut self.pending),
        }
    }

    /// Release every waiter, in enqueue order, to replay its request.
    pub fn drain_success(self) -> usize {
        self.drain(Ok(()))
    }

    /// Reject every waiter, in enqueue order, with the same failure.
    pub fn drain_failure(self, error: &AuthError) -> usize {
        self.drain(Err(error.clone()))
    }

    fn drain(self, outcome: RefreshOutcome) -> usize {
        let count = self.pending.len();
        for tx in self.pending {
            // A waiter whose caller went away is simply skipped.
            let _ = tx.send(outcome.clone());
        }
        count
    }
}
