//! Mock session store for testing.

use crate::error::{Result, SessionError};
use crate::providers::{PersistedSession, SaveOptions, SessionStore};
use crate::state::{Credential, UserRecord};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct MockStoreState {
    session: Option<PersistedSession>,
    fail_saves: bool,
    save_calls: usize,
    clear_calls: usize,
    load_calls: usize,
}

/// Mock session store.
///
/// Holds at most one pair in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockSessionStore {
    inner: Arc<Mutex<MockStoreState>>,
}

impl MockSessionStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockStoreState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pre-populate the store, as if a previous session persisted it.
    pub fn seed(&self, credential: Credential, user: UserRecord) {
        self.state().session = Some(PersistedSession { credential, user });
    }

    /// Make subsequent saves fail.
    pub fn fail_saves(&self, fail: bool) {
        self.state().fail_saves = fail;
    }

    /// The currently persisted pair, if any.
    #[must_use]
    pub fn stored(&self) -> Option<PersistedSession> {
        self.state().session.clone()
    }

    /// Number of `save` calls observed.
    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.state().save_calls
    }

    /// Number of `clear` calls observed.
    #[must_use]
    pub fn clear_calls(&self) -> usize {
        self.state().clear_calls
    }

    /// Number of `load` calls observed.
    #[must_use]
    pub fn load_calls(&self) -> usize {
        self.state().load_calls
    }
}

impl SessionStore for MockSessionStore {
    fn save(
        &self,
        credential: &Credential,
        user: &UserRecord,
        _options: &SaveOptions,
    ) -> Result<()> {
        let mut state = self.state();
        state.save_calls += 1;
        if state.fail_saves {
            return Err(SessionError::StorageFailure {
                reason: "mock save failure".to_string(),
            });
        }
        state.session = Some(PersistedSession {
            credential: credential.clone(),
            user: user.clone(),
        });
        Ok(())
    }

    fn load(&self) -> Option<PersistedSession> {
        let mut state = self.state();
        state.load_calls += 1;
        state.session.clone()
    }

    fn clear(&self) {
        let mut state = self.state();
        state.clear_calls += 1;
        state.session = None;
    }

    fn has_credential(&self) -> bool {
        self.state().session.is_some()
    }
}
