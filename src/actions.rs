//! Session actions.
//!
//! This module defines all possible inputs to the session reducer.
//! Actions follow the CQRS split: commands mark the start of an
//! operation, events record the outcome of its async work.
//!
//! Actions are the **only** way the machine transitions. The reducer is
//! a pure function: `(State, Action) → (State, Effects)`.

use crate::error::SessionError;
use crate::state::{Credential, UserRecord};
use std::time::Duration;

/// Session action.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    // ═══════════════════════════════════════════════════════════════════
    // Hydration (boot-time restore from storage)
    // ═══════════════════════════════════════════════════════════════════
    /// Boot-time hydration began.
    HydrationStarted,

    /// A persisted pair was restored (and optionally validated).
    HydrationSucceeded {
        /// Restored bearer token.
        credential: Credential,
        /// Restored or freshly fetched user record.
        user: UserRecord,
    },

    /// Nothing usable was persisted, or validation failed.
    ///
    /// Storage is cleared; this is the quiet path to `Unauthenticated`,
    /// never an error surfaced to the UI.
    HydrationFailed,

    // ═══════════════════════════════════════════════════════════════════
    // Login / Register
    // ═══════════════════════════════════════════════════════════════════
    /// A login or register call went in flight.
    AuthStarted,

    /// The backend issued a credential and user record.
    AuthSucceeded {
        /// Issued bearer token.
        credential: Credential,
        /// User record from the response.
        user: UserRecord,
    },

    /// The login or register call failed.
    ///
    /// Storage is left untouched; nothing is persisted on failure.
    AuthFailed {
        /// Failure to surface to the UI.
        error: SessionError,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Session Maintenance
    // ═══════════════════════════════════════════════════════════════════
    /// A refresh call replaced the credential; the user record is unchanged.
    TokenRefreshed {
        /// Replacement bearer token.
        credential: Credential,
    },

    /// The cached user record was replaced (profile edits).
    UserUpdated {
        /// Replacement user record.
        user: UserRecord,
    },

    /// The idle warning lead time was reached with no user activity.
    IdleWarning {
        /// Time left until automatic logout.
        remaining: Duration,
    },

    /// A 401 survived the single refresh attempt; the session is over.
    SessionExpired,

    /// Explicit or automatic logout completed locally.
    LoggedOut,

    /// The UI acknowledged the `Error` state.
    ErrorCleared,
}
