//! Session oracle port.
//!
//! Supplies the current session mode. The repository consults it before
//! every operation rather than caching it at construction, since login and
//! logout can happen mid-session.

use crate::domain::foundation::UserId;

/// The current session mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Unauthenticated; all data lives on-device.
    #[default]
    Guest,
    /// Authenticated as the given user; the remote store is the source of
    /// truth.
    Authenticated(UserId),
}

impl SessionState {
    /// Returns true when a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Returns the current user id, if authenticated.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            SessionState::Guest => None,
            SessionState::Authenticated(user_id) => Some(user_id),
        }
    }
}

/// Read-only view of session state, injected into the repository.
///
/// Reads are synchronous; the oracle must answer from state it already
/// holds, never by performing I/O.
pub trait SessionOracle: Send + Sync {
    /// Returns the session mode at this instant.
    fn current(&self) -> SessionState;
}
