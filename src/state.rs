//! Session state types.
//!
//! This module defines the core state types for the session lifecycle:
//! the opaque [`Credential`], the cached [`UserRecord`], and the
//! [`SessionState`] machine. All types are `Clone` to support the
//! functional architecture pattern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// Credential
// ═══════════════════════════════════════════════════════════════════════

/// Opaque bearer token issued by the backend.
///
/// The client never inspects or mutates the token; it is only replaced
/// wholesale (login, refresh) or cleared (logout). Server-side expiration
/// is not known to the client.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the `Authorization` header value for this credential.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Tokens are secrets; keep them out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(<redacted>)")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// User Record
// ═══════════════════════════════════════════════════════════════════════

/// Cached copy of the server's user record.
///
/// Associated 1:1 with the active [`Credential`] and replaced together
/// with it. May go stale between profile refreshes; the server remains
/// the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Backend-assigned user id.
    pub id: u64,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Email address.
    #[serde(default)]
    pub email: String,

    /// Whether the user has admin privileges.
    #[serde(default)]
    pub is_admin: bool,

    /// Whether the user's email address has been verified.
    #[serde(default)]
    pub is_verified: bool,

    /// Account creation timestamp, when the backend provides one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// First letter of the display name, for avatar placeholders.
    ///
    /// Falls back to `"U"` for an empty name.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .chars()
            .next()
            .map_or_else(|| "U".to_string(), |c| c.to_uppercase().to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Session State Machine
// ═══════════════════════════════════════════════════════════════════════

/// The session state machine.
///
/// Created once per controller as `Loading` and cycling thereafter;
/// there are no terminal states. `Authenticated` structurally carries
/// both the credential and the user record, so the "authenticated
/// implies both non-null" invariant cannot be violated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// An async resolution (hydration, login, register) is in flight.
    Loading,

    /// A credential and its user record are active.
    Authenticated {
        /// The active bearer token.
        credential: Credential,
        /// The user associated with the token.
        user: UserRecord,
    },

    /// No active session.
    Unauthenticated,

    /// The last operation failed with a user-facing message.
    Error {
        /// Message suitable for display.
        message: String,
    },
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Loading
    }
}

impl SessionState {
    /// `true` while an async resolution is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// `true` when a session is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The active credential, if any.
    #[must_use]
    pub const fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Authenticated { credential, .. } => Some(credential),
            _ => None,
        }
    }

    /// The cached user record, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// `Authorization` header value for the active credential, if any.
    ///
    /// Transports call this instead of reaching into storage themselves.
    #[must_use]
    pub fn auth_header(&self) -> Option<String> {
        self.credential().map(Credential::bearer_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: 7,
            name: "ada".to_string(),
            email: "ada@example.com".to_string(),
            is_admin: false,
            is_verified: true,
            created_at: None,
        }
    }

    #[test]
    fn test_default_is_loading() {
        assert!(SessionState::default().is_loading());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("super-secret-token");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("super-secret-token"));
    }

    #[test]
    fn test_bearer_header() {
        let credential = Credential::new("T1");
        assert_eq!(credential.bearer_header(), "Bearer T1");
    }

    #[test]
    fn test_authenticated_accessors() {
        let state = SessionState::Authenticated {
            credential: Credential::new("T1"),
            user: user(),
        };
        assert!(state.is_authenticated());
        assert_eq!(state.user().map(|u| u.id), Some(7));
        assert_eq!(state.auth_header().as_deref(), Some("Bearer T1"));
    }

    #[test]
    fn test_unauthenticated_has_no_credential() {
        let state = SessionState::Unauthenticated;
        assert!(state.credential().is_none());
        assert!(state.auth_header().is_none());
    }

    #[test]
    fn test_user_record_tolerates_sparse_json() {
        // Backends commonly return only id and name on login.
        let user: UserRecord =
            serde_json::from_str(r#"{"id":1,"name":"A"}"#).unwrap_or_else(|_| unreachable!());
        assert_eq!(user.id, 1);
        assert!(!user.is_admin);
        assert!(!user.is_verified);
    }

    #[test]
    fn test_initials() {
        assert_eq!(user().initials(), "A");
        let anonymous = UserRecord {
            name: String::new(),
            ..user()
        };
        assert_eq!(anonymous.initials(), "U");
    }
}
