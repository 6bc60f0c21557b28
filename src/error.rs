//! Error types for session lifecycle operations.

use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Error taxonomy for the session lifecycle.
///
/// Network conditions are distinguished from server-returned errors
/// because they warrant different user messaging ("server unreachable"
/// vs "wrong password"). Storage corruption is auto-repaired and never
/// reaches the UI; the variant exists for store internals and logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    // ═══════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════
    /// Credentials were rejected by the backend.
    ///
    /// Carries the server's rejection message when one was returned
    /// ("Account locked"), falling back to a generic one.
    #[error("{message}")]
    InvalidCredentials {
        /// Message suitable for display.
        message: String,
    },

    /// The backend rejected one or more request fields.
    #[error("Validation failed")]
    ValidationError {
        /// Per-field messages, keyed by field name.
        fields: BTreeMap<String, Vec<String>>,
    },

    // ═══════════════════════════════════════════════════════════
    // Transport Errors
    // ═══════════════════════════════════════════════════════════
    /// No HTTP response was received (connect failure or timeout).
    #[error("Server unreachable")]
    NetworkUnavailable,

    /// The backend returned a non-success HTTP status.
    #[error("Server error (status {status})")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// A 2xx response did not carry the expected payload.
    #[error("Malformed server response")]
    MalformedResponse,

    /// Raw 401 from the transport.
    ///
    /// Converted to [`SessionError::SessionExpired`] once the single
    /// refresh attempt has also failed; never surfaced to the UI as-is.
    #[error("Unauthorized")]
    Unauthorized,

    // ═══════════════════════════════════════════════════════════
    // Session Errors
    // ═══════════════════════════════════════════════════════════
    /// The session ended after a failed refresh; informational, not fatal.
    #[error("Session has expired")]
    SessionExpired,

    // ═══════════════════════════════════════════════════════════
    // Storage Errors
    // ═══════════════════════════════════════════════════════════
    /// A persisted entry failed to decode. Auto-repaired by clearing it.
    #[error("Stored session data was corrupted")]
    StorageCorrupted,

    /// A storage write failed.
    #[error("Storage operation failed: {reason}")]
    StorageFailure {
        /// Backend-specific description.
        reason: String,
    },
}

impl SessionError {
    /// Credential rejection with the generic message, for backends
    /// that return a bare 422.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            message: "Invalid credentials".to_string(),
        }
    }

    /// `true` if this error is due to invalid user input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use session_gate::SessionError;
    /// assert!(SessionError::invalid_credentials().is_user_error());
    /// assert!(!SessionError::NetworkUnavailable.is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::ValidationError { .. }
        )
    }

    /// `true` if retrying the same request later could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkUnavailable | Self::ServerError { .. })
    }
}
