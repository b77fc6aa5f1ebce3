//! Session state model: the user slot and pending-operation marker.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware components branch on `UserSlot`, so the
//! "not yet determined" and "determined: signed out" cases stay distinct.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::net::error::ApiError;
use crate::net::types::User;

/// Last-known authentication state for the browser session.
///
/// `Unknown` only ever appears before the initial resolution (or after a
/// fetch failure that left the question open); every later transition lands
/// on `Absent` or `Present`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UserSlot {
    /// Not yet determined; the initial fetch has not resolved.
    #[default]
    Unknown,
    /// Determined: no authenticated user.
    Absent,
    /// Determined: signed in as this user.
    Present(User),
}

impl UserSlot {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Present(user) => Some(user),
            _ => None,
        }
    }
}

/// The single credential-mutating operation currently in flight, if any.
///
/// The core does not enforce exclusion; forms disable their submit controls
/// while this is not `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PendingOp {
    #[default]
    None,
    LoggingIn,
    Registering,
    LoggingOut,
}

/// Result of reducing a canonical-user fetch into the slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetch answered the question; write this slot.
    Resolved(UserSlot),
    /// The fetch failed without answering it; keep the current slot and
    /// surface the error.
    Failed(ApiError),
}

/// Reduce the result of `GET /auth/user/` into a slot transition.
///
/// `Ok(None)` is the transport layer's encoding of 401/403: a normal
/// "not signed in" outcome, not an error.
pub fn resolve_fetch(result: Result<Option<User>, ApiError>) -> FetchOutcome {
    match result {
        Ok(Some(user)) => FetchOutcome::Resolved(UserSlot::Present(user)),
        Ok(None) => FetchOutcome::Resolved(UserSlot::Absent),
        Err(err) => FetchOutcome::Failed(err),
    }
}
