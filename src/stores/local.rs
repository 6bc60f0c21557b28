//! Persisted session store.

use crate::constants::storage_keys;
use crate::error::{Result, SessionError};
use crate::providers::{PersistedSession, SaveOptions, SessionStore, StorageBackend};
use crate::state::{Credential, UserRecord};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

// Sentinels a prior buggy writer may have persisted as raw strings.
const SENTINELS: &[&str] = &["", "undefined", "null"];

/// Session store over any [`StorageBackend`].
///
/// Entries are stored under prefixed keys as base64-encoded JSON with
/// an expiration stamp (default 7 days at the call sites).
///
/// The base64 layer is **obfuscation only** — it keeps tokens out of
/// casual `grep` reach and nothing more. Real at-rest secret storage
/// is not something a client-side store can provide.
///
/// Decoding fails closed: corrupt base64, corrupt JSON, sentinel
/// strings, and expired stamps all read as absent, and the offending
/// keys are removed on detection.
#[derive(Debug, Clone)]
pub struct LocalSessionStore<B: StorageBackend> {
    backend: B,
    prefix: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Entry<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

impl<B: StorageBackend> LocalSessionStore<B> {
    /// Create a store over `backend` with the default key prefix.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            prefix: storage_keys::PREFIX.to_string(),
        }
    }

    /// Use a custom key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn encode<T: Serialize>(value: &T, expires_at: DateTime<Utc>) -> Result<String> {
        let entry = Entry {
            value,
            expires_at,
        };
        let json = serde_json::to_string(&entry).map_err(|err| SessionError::StorageFailure {
            reason: err.to_string(),
        })?;
        Ok(ENGINE.encode(json))
    }

    /// Decode the entry at `name`, removing it if it is corrupt or
    /// expired.
    fn decode<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let key = self.key(name);
        let raw = self.backend.get(&key)?;

        let entry = match parse_entry::<T>(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(key, error = %err, "removing corrupt storage entry");
                self.backend.remove(&key);
                return None;
            }
        };

        if entry.expires_at <= Utc::now() {
            tracing::debug!(key, "removing expired storage entry");
            self.backend.remove(&key);
            return None;
        }

        Some(entry.value)
    }
}

/// Parse a raw stored string back into an entry.
///
/// Sentinel strings, bad base64, non-UTF-8 bytes, and unparsable JSON
/// all collapse into [`SessionError::StorageCorrupted`]; the caller
/// only needs to know the entry is unreadable, not why.
fn parse_entry<T: DeserializeOwned>(raw: &str) -> Result<Entry<T>> {
    if SENTINELS.contains(&raw) {
        return Err(SessionError::StorageCorrupted);
    }
    let bytes = ENGINE
        .decode(raw.as_bytes())
        .map_err(|_| SessionError::StorageCorrupted)?;
    let json = String::from_utf8(bytes).map_err(|_| SessionError::StorageCorrupted)?;
    serde_json::from_str(&json).map_err(|_| SessionError::StorageCorrupted)
}

impl<B: StorageBackend> SessionStore for LocalSessionStore<B> {
    fn save(
        &self,
        credential: &Credential,
        user: &UserRecord,
        options: &SaveOptions,
    ) -> Result<()> {
        let expires_at = Utc::now() + options.expires_in;

        let encoded_credential = Self::encode(credential, expires_at)?;
        let encoded_user = Self::encode(user, expires_at)?;

        self.backend
            .set(&self.key(storage_keys::CREDENTIAL), &encoded_credential)?;
        if let Err(err) = self.backend.set(&self.key(storage_keys::USER), &encoded_user) {
            // Never leave a half-written pair behind.
            self.backend.remove(&self.key(storage_keys::CREDENTIAL));
            return Err(err);
        }
        Ok(())
    }

    fn load(&self) -> Option<PersistedSession> {
        let credential: Option<Credential> = self.decode(storage_keys::CREDENTIAL);
        let user: Option<UserRecord> = self.decode(storage_keys::USER);

        match (credential, user) {
            (Some(credential), Some(user)) => Some(PersistedSession { credential, user }),
            (None, None) => None,
            _ => {
                // One half survived; clear it so the pair stays atomic.
                tracing::warn!("partial session pair in storage, clearing");
                self.clear();
                None
            }
        }
    }

    fn clear(&self) {
        for key in self.backend.keys() {
            if key.starts_with(&self.prefix) {
                self.backend.remove(&key);
            }
        }
    }

    fn has_credential(&self) -> bool {
        self.backend
            .get(&self.key(storage_keys::CREDENTIAL))
            .is_some_and(|raw| !SENTINELS.contains(&raw.as_str()))
    }
}
