//! Session teardown and the signed-in/signed-out signal.

use std::sync::Arc;

use tokio::sync::watch;

use super::error::AuthError;
use super::store::SessionStore;

/// Whether the application currently holds a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    Authenticated,
    SignedOut,
}

/// Clears the session store and tells the presentation layer to return to
/// the sign-in entry point.
///
/// Subscribers get a change notification only on a real transition, so a
/// burst of failures produces one logout signal.
#[derive(Clone)]
pub struct SessionTeardown {
    store: Arc<dyn SessionStore>,
    status: Arc<watch::Sender<SessionStatus>>,
}

impl SessionTeardown {
    /// Build a teardown whose initial status mirrors what the store holds.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let initial = match store.load_session() {
            Ok(Some(_)) => SessionStatus::Authenticated,
            _ => SessionStatus::SignedOut,
        };
        let (status, _) = watch::channel(initial);
        Self {
            store,
            status: Arc::new(status),
        }
    }

    /// Observe session status changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Record that a session was established (login).
    pub fn mark_authenticated(&self) {
        self.transition(SessionStatus::Authenticated);
    }

    /// Clear tokens and profile, then signal sign-out. Idempotent.
    pub fn teardown(&self) -> Result<(), AuthError> {
        let cleared = self.store.clear();
        if self.transition(SessionStatus::SignedOut) {
            tracing::warn!("Session torn down; returning to sign-in");
        }
        cleared
    }

    fn transition(&self, next: SessionStatus) -> bool {
        self.status.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        })
    }
}
