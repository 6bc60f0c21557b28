//! Session store trait.

use crate::error::Result;
use crate::state::{Credential, UserRecord};
use chrono::Duration;

/// Durable client-side session persistence.
///
/// # Failure policy
///
/// Storage fails closed: any decode failure (corrupt encoding, JSON
/// parse failure, sentinel strings such as a literal `"undefined"`)
/// reads as *absent*, never as an error. A broken store must degrade
/// the app to unauthenticated, not crash it.
///
/// # Implementation Notes
///
/// Client-side storage is synchronous, so unlike the network-backed
/// transport this trait is not async.
pub trait SessionStore: Send + Sync {
    /// Persist the credential/user pair.
    ///
    /// Write-through: callers invoke this on every state change that
    /// produces a new pair.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::StorageFailure`] if the backend
    /// rejects the write. Callers treat this as non-fatal.
    fn save(
        &self,
        credential: &Credential,
        user: &UserRecord,
        options: &SaveOptions,
    ) -> Result<()>;

    /// Restore the persisted pair.
    ///
    /// Returns `None` if either entry is absent, malformed, or expired.
    /// Never returns a partially populated pair.
    fn load(&self) -> Option<PersistedSession>;

    /// Remove all persisted session keys. Idempotent.
    fn clear(&self);

    /// Cheap existence check for the credential entry, without a full
    /// decode.
    fn has_credential(&self) -> bool;
}

/// Options for [`SessionStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// How long the persisted entries stay readable.
    pub expires_in: Duration,
}

impl SaveOptions {
    /// Persist with the given lifetime.
    #[must_use]
    pub const fn new(expires_in: Duration) -> Self {
        Self { expires_in }
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            expires_in: Duration::days(7),
        }
    }
}

/// A restored credential/user pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedSession {
    /// The restored bearer token.
    pub credential: Credential,

    /// The restored user record (possibly stale).
    pub user: UserRecord,
}

/// Raw string key/value storage. The durable substrate a
/// [`SessionStore`] writes through to.
pub trait StorageBackend: Send + Sync {
    /// Read the value at `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::StorageFailure`] if the write
    /// cannot be performed.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the entry at `key`, if present.
    fn remove(&self, key: &str);

    /// All keys currently present.
    fn keys(&self) -> Vec<String>;
}
