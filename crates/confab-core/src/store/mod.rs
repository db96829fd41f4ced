//! Synchronous, single-writer container for the session state.
//!
//! Actions are applied atomically under the channel's lock, so readers and
//! subscribers only ever see whole snapshots. Cloning the store shares it.

pub mod state;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

pub use state::{reduce, SessionAction, SessionState};

#[derive(Clone)]
pub struct SessionStore {
    sender: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    pub fn new(initial: SessionState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Apply an action and notify subscribers.
    pub fn dispatch(&self, action: SessionAction) {
        trace!(?action, "Dispatching session action");
        self.sender.send_modify(|state| reduce(state, action));
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    /// Read part of the state without cloning all of it.
    ///
    /// The closure runs under the read lock; do not block in it.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Id of the active session.
    pub fn active_session_id(&self) -> String {
        self.read(|state| state.id.clone())
    }

    /// Receiver that observes every dispatched snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("active_session_id", &self.active_session_id())
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
