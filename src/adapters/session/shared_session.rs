//! Shared mutable session oracle.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::UserId;
use crate::ports::{SessionOracle, SessionState};

/// Session oracle backed by shared mutable state.
///
/// The embedding application holds one clone and flips it on login, logout,
/// and "continue as guest"; the repository reads it through the port on
/// every operation. Starts in guest mode.
#[derive(Clone, Default)]
pub struct SharedSessionOracle {
    state: Arc<RwLock<SessionState>>,
}

impl SharedSessionOracle {
    /// Creates an oracle in guest mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an oracle already authenticated as the given user.
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::Authenticated(user_id))),
        }
    }

    /// Switches to authenticated mode for the given user.
    pub fn login(&self, user_id: UserId) {
        *self.write() = SessionState::Authenticated(user_id);
    }

    /// Switches to guest mode.
    pub fn logout(&self) {
        *self.write() = SessionState::Guest;
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionOracle for SharedSessionOracle {
    fn current(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
