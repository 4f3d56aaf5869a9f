//! Typed session context threaded through protected views.
//!
//! The gate is resolved once per request from the identity cookie and passed
//! explicitly; handlers never consult ambient global state. A failed check is
//! indistinguishable from a missing session on purpose: the gate fails
//! closed.

use std::fmt::Display;

/// Outcome of the per-request session check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus<U> {
    /// The check has not completed yet. Only observable while the identity
    /// lookup is in flight; a rendered response is never produced in this
    /// state.
    Checking,
    Authenticated(U),
    Unauthenticated,
}

impl<U> SessionStatus<U> {
    /// Folds the result of a session-presence check into a terminal state.
    ///
    /// `Ok(Some(user))` authenticates; `Ok(None)` means no session; `Err`
    /// (the check itself failed) is logged and treated as no session.
    pub fn resolve<E: Display>(check: Result<Option<U>, E>) -> Self {
        match check {
            Ok(Some(user)) => SessionStatus::Authenticated(user),
            Ok(None) => SessionStatus::Unauthenticated,
            Err(e) => {
                log::error!("Session check failed, treating as unauthenticated: {e}");
                SessionStatus::Unauthenticated
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated(_))
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&U> {
        match self {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
