//! Mock auth transport for testing.

use crate::error::{Result, SessionError};
use crate::providers::{AuthPayload, AuthTransport, LoginRequest, RegisterRequest};
use crate::state::{Credential, UserRecord};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct MockTransportState {
    login_results: VecDeque<Result<AuthPayload>>,
    register_results: VecDeque<Result<AuthPayload>>,
    refresh_results: VecDeque<Result<Credential>>,
    profile_results: VecDeque<Result<UserRecord>>,
    logout_results: VecDeque<Result<()>>,
    login_calls: usize,
    register_calls: usize,
    refresh_calls: usize,
    profile_calls: usize,
    logout_calls: usize,
}

/// Mock auth transport with scripted results.
///
/// Each endpoint pops from its own queue of scripted results. An empty
/// queue yields [`SessionError::NetworkUnavailable`], except logout
/// which defaults to success (servers rarely refuse a logout, and most
/// tests should not have to script one). Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportState>>,
}

impl MockTransport {
    /// Create a transport with no scripted results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockTransportState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script the next login result.
    pub fn enqueue_login(&self, result: Result<AuthPayload>) {
        self.state().login_results.push_back(result);
    }

    /// Script the next register result.
    pub fn enqueue_register(&self, result: Result<AuthPayload>) {
        self.state().register_results.push_back(result);
    }

    /// Script the next refresh result.
    pub fn enqueue_refresh(&self, result: Result<Credential>) {
        self.state().refresh_results.push_back(result);
    }

    /// Script the next profile result.
    pub fn enqueue_profile(&self, result: Result<UserRecord>) {
        self.state().profile_results.push_back(result);
    }

    /// Script the next logout result.
    pub fn enqueue_logout(&self, result: Result<()>) {
        self.state().logout_results.push_back(result);
    }

    /// Number of login calls observed.
    #[must_use]
    pub fn login_calls(&self) -> usize {
        self.state().login_calls
    }

    /// Number of register calls observed.
    #[must_use]
    pub fn register_calls(&self) -> usize {
        self.state().register_calls
    }

    /// Number of refresh calls observed.
    #[must_use]
    pub fn refresh_calls(&self) -> usize {
        self.state().refresh_calls
    }

    /// Number of profile calls observed.
    #[must_use]
    pub fn profile_calls(&self) -> usize {
        self.state().profile_calls
    }

    /// Number of logout calls observed.
    #[must_use]
    pub fn logout_calls(&self) -> usize {
        self.state().logout_calls
    }
}

impl AuthTransport for MockTransport {
    fn login(&self, _request: &LoginRequest) -> impl Future<Output = Result<AuthPayload>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
            state.login_calls += 1;
            state
                .login_results
                .pop_front()
                .unwrap_or(Err(SessionError::NetworkUnavailable))
        }
    }

    fn register(
        &self,
        _request: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthPayload>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
            state.register_calls += 1;
            state
                .register_results
                .pop_front()
                .unwrap_or(Err(SessionError::NetworkUnavailable))
        }
    }

    fn logout(&self, _credential: &Credential) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
            state.logout_calls += 1;
            state.logout_results.pop_front().unwrap_or(Ok(()))
        }
    }

    fn refresh(&self, _credential: &Credential) -> impl Future<Output = Result<Credential>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
            state.refresh_calls += 1;
            state
                .refresh_results
                .pop_front()
                .unwrap_or(Err(SessionError::NetworkUnavailable))
        }
    }

    fn profile(&self, _credential: &Credential) -> impl Future<Output = Result<UserRecord>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
            state.profile_calls += 1;
            state
                .profile_results
                .pop_front()
                .unwrap_or(Err(SessionError::NetworkUnavailable))
        }
    }
}
