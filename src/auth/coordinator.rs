//! Single-flight session refresh.
//!
//! Every request that comes back `401` for the first time ends up here. The
//! first one to arrive while the coordinator is idle becomes the leader and
//! performs the refresh; everyone arriving while it runs is parked in the
//! [`WaiterQueue`] and released (or rejected) together when it settles. Each
//! caller then replays its own request exactly once.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::error::AuthError;
use super::identity::RefreshClient;
use super::store::SessionStore;
use super::teardown::SessionTeardown;
use super::token::Session;
use super::waiters::{RefreshOutcome, Waiter, WaiterQueue};
use crate::client::{ApiRequest, ApiResponse, Dispatcher};
use crate::error::{LobbyError, Result};
use crate::util::timeout::with_timeout;

/// Refresh phase of a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RefreshState {
    Idle,
    Refreshing,
}

#[derive(Debug)]
struct CoordinatorState {
    phase: RefreshState,
    queue: WaiterQueue,
    /// Bumped every time a cycle settles.
    cycle: u64,
}

enum Role {
    Leader,
    Waiter(Waiter),
    /// A refresh already landed after this request was rejected.
    Replay,
}

/// Owns the refresh state machine for one client.
pub struct RefreshCoordinator {
    store: Arc<dyn SessionStore>,
    refresher: Arc<dyn RefreshClient>,
    teardown: SessionTeardown,
    refresh_timeout: Option<Duration>,
    state: Mutex<CoordinatorState>,
}

impl RefreshCoordinator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        refresher: Arc<dyn RefreshClient>,
        teardown: SessionTeardown,
    ) -> Self {
        Self {
            store,
            refresher,
            teardown,
            refresh_timeout: None,
            state: Mutex::new(CoordinatorState {
                phase: RefreshState::Idle,
                queue: WaiterQueue::new(),
                cycle: 0,
            }),
        }
    }

    /// Bound the refresh call. `None` (the default) waits indefinitely.
    pub fn with_refresh_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn state(&self) -> RefreshState {
        self.lock().phase
    }

    /// Number of callers parked behind the in-flight refresh.
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn teardown(&self) -> &SessionTeardown {
        &self.teardown
    }

    /// Recover from a first `401` and replay `request` once.
    ///
    /// `request` must already carry the retry mark so that a second `401`
    /// on the replay is returned to the caller instead of coming back here.
    /// `rejected_token` is the access token the failed attempt was sent with.
    pub async fn handle_unauthorized(
        &self,
        dispatcher: &Dispatcher,
        request: ApiRequest,
        rejected_token: Option<&str>,
    ) -> Result<ApiResponse> {
        debug_assert!(request.is_retry());
        self.await_refresh(rejected_token)
            .await
            .map_err(LobbyError::RefreshFailed)?;
        tracing::debug!(
            request_id = %request.id(),
            method = %request.method(),
            path = request.path(),
            "Replaying request after refresh"
        );
        dispatcher.transmit(&request).await
    }

    /// Wait until a refresh cycle covering `rejected_token` has settled,
    /// starting one if none is running.
    pub(crate) async fn await_refresh(&self, rejected_token: Option<&str>) -> RefreshOutcome {
        // The store is read outside the state lock. If a cycle settles in
        // between, the read may be stale and the decision is retaken.
        let role = loop {
            let cycle = {
                let mut state = self.lock();
                if state.phase == RefreshState::Refreshing {
                    break Role::Waiter(state.queue.enqueue());
                }
                state.cycle
            };
            let current = self.store.load_session().ok().flatten();
            let mut state = self.lock();
            if state.cycle != cycle || state.phase == RefreshState::Refreshing {
                continue;
            }
            if superseded(current.as_ref(), rejected_token) {
                break Role::Replay;
            }
            state.phase = RefreshState::Refreshing;
            break Role::Leader;
        };

        match role {
            Role::Replay => Ok(()),
            Role::Waiter(waiter) => waiter.await.unwrap_or(Err(AuthError::RefreshAbandoned)),
            Role::Leader => {
                let mut guard = LeaderGuard {
                    coordinator: self,
                    settled: false,
                };
                let outcome = self.refresh_session().await;
                guard.settled = true;
                self.settle(outcome)
            }
        }
    }

    async fn refresh_session(&self) -> RefreshOutcome {
        let session = self
            .store
            .load_session()?
            .filter(|session| !session.refresh_token.is_empty())
            .ok_or(AuthError::NotLoggedIn)?;
        tracing::info!("Refreshing session");
        let refresh = self.refresher.refresh(&session.refresh_token);
        let refreshed = match self.refresh_timeout {
            Some(limit) => with_timeout(limit, refresh).await?,
            None => refresh.await?,
        };
        self.store.save_session(&refreshed)
    }

    fn settle(&self, outcome: RefreshOutcome) -> RefreshOutcome {
        let queue = self.finish_cycle();
        match &outcome {
            Ok(()) => {
                let waiters = queue.drain_success();
                tracing::info!(waiters, "Session refreshed");
            }
            Err(error) => {
                let waiters = queue.drain_failure(error);
                tracing::warn!(waiters, %error, "Session refresh failed");
                if let Err(teardown_error) = self.teardown.teardown() {
                    tracing::warn!(error = %teardown_error, "Failed to clear session store");
                }
            }
        }
        outcome
    }

    /// Flip back to idle and take the queue in one step, so callers that
    /// arrive afterwards start a new cycle instead of joining this one.
    fn finish_cycle(&self) -> WaiterQueue {
        let mut state = self.lock();
        state.phase = RefreshState::Idle;
        state.cycle = state.cycle.wrapping_add(1);
        state.queue.take()
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Whether the store already holds a session other than the one that was
/// rejected.
fn superseded(current: Option<&Session>, rejected_token: Option<&str>) -> bool {
    current.is_some_and(|session| rejected_token != Some(session.access_token.as_str()))
}

/// Returns the coordinator to idle if the leader is dropped mid-refresh.
struct LeaderGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let waiters = self
            .coordinator
            .finish_cycle()
            .drain_failure(&AuthError::RefreshAbandoned);
        tracing::warn!(waiters, "Refresh abandoned before it completed");
    }
}
