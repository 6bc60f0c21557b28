//! Session effects.
//!
//! Effects are **values**, not execution. The reducer returns them and
//! the controller interprets them; the reducer itself performs no I/O.

use crate::state::{Credential, UserRecord};
use std::time::Duration;

/// Side effect produced by the session reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// No effect.
    None,

    /// Write the pair through to the session store.
    Persist {
        /// Credential to persist.
        credential: Credential,
        /// User record to persist.
        user: UserRecord,
    },

    /// Remove all persisted session keys.
    ClearStorage,

    /// Start (or restart) the refresh and idle timers.
    ArmTimers,

    /// Cancel the refresh and idle timers.
    DisarmTimers,

    /// Deliver a notice to observers.
    Notify(SessionNotice),
}

/// Out-of-band notice for the UI layer.
///
/// Notices are informational; they never represent a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNotice {
    /// The session will be logged out soon unless activity is recorded.
    IdleWarning {
        /// Time left until automatic logout.
        remaining: Duration,
    },

    /// The session expired (401 after a failed refresh) and was cleared.
    SessionExpired,
}
