//! Session controller.
//!
//! The imperative shell around [`SessionReducer`]: it owns the state,
//! feeds actions through the reducer, and interprets the returned
//! effects (persistence, timers, notices). All transition logic lives
//! in the reducer; the controller only performs I/O.
//!
//! # Timers
//!
//! While `Authenticated`, a single background task runs two clocks:
//! a proactive refresh tick (so an in-flight session does not 401
//! mid-use) and an idle deadline with a warning lead. The task is
//! re-armed on every transition that enters `Authenticated` and
//! aborted on every transition that leaves it, so timers never leak
//! across login/logout cycles. The task holds only a weak handle to
//! the controller; dropping the last controller clone ends it.

use crate::actions::SessionAction;
use crate::config::SessionConfig;
use crate::effects::{SessionEffect, SessionNotice};
use crate::environment::SessionEnvironment;
use crate::error::{Result, SessionError};
use crate::providers::{
    AuthTransport, LoginRequest, RegisterRequest, SaveOptions, SessionStore,
};
use crate::reducer::Reducer;
use crate::reducers::SessionReducer;
use crate::state::{Credential, SessionState, UserRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant, MissedTickBehavior};

/// Client-side session lifecycle manager.
///
/// Explicitly constructed and injected; any number of independent
/// controllers can coexist. Clones share the same session.
pub struct SessionController<S, T>
where
    S: SessionStore + 'static,
    T: AuthTransport + 'static,
{
    inner: Arc<Inner<S, T>>,
}

struct Inner<S, T>
where
    S: SessionStore + 'static,
    T: AuthTransport + 'static,
{
    env: SessionEnvironment<S, T>,
    config: SessionConfig,
    reducer: SessionReducer,
    state: Mutex<SessionState>,
    state_tx: watch::Sender<SessionState>,
    notice_tx: mpsc::UnboundedSender<SessionNotice>,
    notice_rx: Mutex<Option<mpsc::UnboundedReceiver<SessionNotice>>>,
    last_activity: Mutex<Instant>,
    timer: Mutex<Option<JoinHandle<()>>>,
    initialized: AtomicBool,
}

impl<S, T> Clone for SessionController<S, T>
where
    S: SessionStore + 'static,
    T: AuthTransport + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, T> SessionController<S, T>
where
    S: SessionStore + 'static,
    T: AuthTransport + 'static,
{
    /// Create a controller in the `Loading` state.
    ///
    /// Call [`SessionController::initialize`] next to resolve it.
    #[must_use]
    pub fn new(env: SessionEnvironment<S, T>, config: SessionConfig) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Loading);
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(Inner {
                env,
                config,
                reducer: SessionReducer::new(),
                state: Mutex::new(SessionState::Loading),
                state_tx,
                notice_tx,
                notice_rx: Mutex::new(Some(notice_rx)),
                last_activity: Mutex::new(Instant::now()),
                timer: Mutex::new(None),
                initialized: AtomicBool::new(false),
            }),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Operations
    // ═══════════════════════════════════════════════════════════════════

    /// Hydrate session state from storage, once per controller.
    ///
    /// With nothing usable persisted this resolves `Unauthenticated`
    /// immediately, without any network call. With a persisted pair it
    /// optionally validates the credential against the profile endpoint;
    /// any failure clears the store and resolves `Unauthenticated`.
    /// Every code path leaves `Loading`.
    pub async fn initialize(&self) {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("initialize called twice, ignoring");
            return;
        }

        self.inner.dispatch(SessionAction::HydrationStarted);

        let Some(persisted) = self.inner.env.storage.load() else {
            self.inner.dispatch(SessionAction::HydrationFailed);
            return;
        };

        if !self.inner.config.validate_on_hydrate {
            self.inner.dispatch(SessionAction::HydrationSucceeded {
                credential: persisted.credential,
                user: persisted.user,
            });
            return;
        }

        match self.inner.env.transport.profile(&persisted.credential).await {
            Ok(user) => {
                self.inner.dispatch(SessionAction::HydrationSucceeded {
                    credential: persisted.credential,
                    user,
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored credential failed validation");
                self.inner.dispatch(SessionAction::HydrationFailed);
            }
        }
    }

    /// Log in with the given credentials.
    ///
    /// On success the pair is persisted and the state becomes
    /// `Authenticated`; on failure nothing is persisted and the state
    /// carries the user-facing message. Overlapping calls are not
    /// serialized; the last resolved call wins.
    ///
    /// # Errors
    ///
    /// Returns the transport error verbatim (also reflected in state).
    pub async fn login(&self, request: LoginRequest) -> Result<UserRecord> {
        self.record_activity();
        self.inner.dispatch(SessionAction::AuthStarted);

        match self.inner.env.transport.login(&request).await {
            Ok(payload) => {
                self.inner.dispatch(SessionAction::AuthSucceeded {
                    credential: payload.credential,
                    user: payload.user.clone(),
                });
                Ok(payload.user)
            }
            Err(error) => {
                self.inner.dispatch(SessionAction::AuthFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Register a new account.
    ///
    /// Same contract as [`SessionController::login`], distinct endpoint.
    ///
    /// # Errors
    ///
    /// Returns the transport error verbatim (also reflected in state).
    pub async fn register(&self, request: RegisterRequest) -> Result<UserRecord> {
        self.record_activity();
        self.inner.dispatch(SessionAction::AuthStarted);

        match self.inner.env.transport.register(&request).await {
            Ok(payload) => {
                self.inner.dispatch(SessionAction::AuthSucceeded {
                    credential: payload.credential,
                    user: payload.user.clone(),
                });
                Ok(payload.user)
            }
            Err(error) => {
                self.inner.dispatch(SessionAction::AuthFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Log out.
    ///
    /// The server-side invalidation is best-effort; local state and
    /// storage are always cleared, so this never fails from the
    /// caller's perspective.
    pub async fn logout(&self) {
        self.inner.logout(SessionAction::LoggedOut).await;
    }

    /// Exchange the current credential for a fresh one.
    ///
    /// On success the stored credential is replaced in place (user
    /// record unchanged) and the timers re-arm. On failure the session
    /// ends: storage is cleared and a [`SessionNotice::SessionExpired`]
    /// notice is delivered.
    ///
    /// # Errors
    ///
    /// [`SessionError::SessionExpired`] when no credential is active or
    /// the refresh was rejected.
    pub async fn refresh(&self) -> Result<Credential> {
        self.inner.refresh_credential().await
    }

    /// Handle a 401 observed on an authenticated call.
    ///
    /// Performs exactly one refresh attempt; if that fails too, the
    /// session is logged out. Returns `true` when the caller may retry
    /// its original request with the new credential. The logout and
    /// refresh endpoints never route their own 401s through here, so
    /// the sequence cannot loop.
    pub async fn recover_unauthorized(&self) -> bool {
        self.inner.refresh_credential().await.is_ok()
    }

    /// Record a user interaction, resetting the idle clock.
    pub fn record_activity(&self) {
        *self
            .inner
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    /// Replace the cached user record (e.g. after a profile edit) and
    /// re-persist it under the current credential.
    pub fn update_user(&self, user: UserRecord) {
        self.inner.dispatch(SessionAction::UserUpdated { user });
    }

    /// Acknowledge the `Error` state, returning to `Unauthenticated`.
    pub fn clear_error(&self) {
        self.inner.dispatch(SessionAction::ErrorCleared);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Observation
    // ═══════════════════════════════════════════════════════════════════

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `true` when a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// `Authorization` header value for the active credential, if any.
    ///
    /// The request-decoration hook for transports that are not managed
    /// by this controller.
    #[must_use]
    pub fn auth_header(&self) -> Option<String> {
        self.state().auth_header()
    }

    /// Watch state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state_tx.subscribe()
    }

    /// Take the notice channel. Yields `None` after the first call.
    #[must_use]
    pub fn notices(&self) -> Option<mpsc::UnboundedReceiver<SessionNotice>> {
        self.inner
            .notice_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<S, T> Inner<S, T>
where
    S: SessionStore + 'static,
    T: AuthTransport + 'static,
{
    /// Run an action through the reducer and execute the effects.
    fn dispatch(self: &Arc<Self>, action: SessionAction) {
        let (snapshot, effects) = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let effects = self.reducer.reduce(&mut state, action);
            (state.clone(), effects)
        };
        let _ = self.state_tx.send(snapshot);

        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(self: &Arc<Self>, effect: SessionEffect) {
        match effect {
            SessionEffect::None => {}
            SessionEffect::Persist { credential, user } => {
                let options = SaveOptions::new(self.config.storage_ttl);
                if let Err(err) = self.env.storage.save(&credential, &user, &options) {
                    // Write-through failure degrades persistence, not the session.
                    tracing::warn!(error = %err, "failed to persist session");
                }
            }
            SessionEffect::ClearStorage => self.env.storage.clear(),
            SessionEffect::ArmTimers => self.arm_timers(),
            SessionEffect::DisarmTimers => self.disarm_timers(),
            SessionEffect::Notify(notice) => {
                let _ = self.notice_tx.send(notice);
            }
        }
    }

    fn current_credential(&self) -> Option<Credential> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .credential()
            .cloned()
    }

    async fn logout(self: &Arc<Self>, terminal: SessionAction) {
        if let Some(credential) = self.current_credential() {
            if let Err(err) = self.env.transport.logout(&credential).await {
                tracing::warn!(error = %err, "logout request failed, clearing local session anyway");
            }
        }
        self.dispatch(terminal);
    }

    async fn refresh_credential(self: &Arc<Self>) -> Result<Credential> {
        let Some(credential) = self.current_credential() else {
            return Err(SessionError::SessionExpired);
        };

        match self.env.transport.refresh(&credential).await {
            Ok(fresh) => {
                self.dispatch(SessionAction::TokenRefreshed {
                    credential: fresh.clone(),
                });
                Ok(fresh)
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, ending session");
                self.logout(SessionAction::SessionExpired).await;
                Err(SessionError::SessionExpired)
            }
        }
    }

    fn arm_timers(self: &Arc<Self>) {
        self.disarm_timers();
        let weak = Arc::downgrade(self);
        let handle = tokio::spawn(timer_loop(weak, self.config.clone()));
        *self.timer.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    fn disarm_timers(&self) {
        if let Some(handle) = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    fn last_activity(&self) -> Instant {
        *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, T> Drop for Inner<S, T>
where
    S: SessionStore + 'static,
    T: AuthTransport + 'static,
{
    fn drop(&mut self) {
        self.disarm_timers();
    }
}

/// Background refresh/idle clock, one per `Authenticated` entry.
///
/// Holds only a weak handle: a resolved tick after the controller is
/// gone finds nothing to mutate and the task exits.
async fn timer_loop<S, T>(inner: Weak<Inner<S, T>>, config: SessionConfig)
where
    S: SessionStore + 'static,
    T: AuthTransport + 'static,
{
    let start = Instant::now();
    let mut refresh = tokio::time::interval_at(start + config.refresh_interval, config.refresh_interval);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut warned_for: Option<Instant> = None;

    loop {
        // The strong handle must not be held across awaits, or dropping
        // the controller would no longer stop the task.
        let last = {
            let Some(strong) = inner.upgrade() else { return };
            strong.last_activity()
        };
        let idle_at = last + config.idle_timeout;
        let warn_at = idle_at
            .checked_sub(config.idle_warning_lead)
            .unwrap_or(idle_at);
        let warn_pending =
            !config.idle_warning_lead.is_zero() && warned_for != Some(idle_at);

        tokio::select! {
            _ = refresh.tick() => {
                let Some(strong) = inner.upgrade() else { return };
                // A failed refresh logs the session out, which aborts
                // this task at the next await.
                let _ = strong.refresh_credential().await;
            }
            () = sleep_until(warn_at), if warn_pending => {
                let Some(strong) = inner.upgrade() else { return };
                // Activity may have arrived while we slept.
                if strong.last_activity() == last {
                    warned_for = Some(idle_at);
                    strong.dispatch(SessionAction::IdleWarning {
                        remaining: config.idle_warning_lead,
                    });
                }
            }
            () = sleep_until(idle_at) => {
                let Some(strong) = inner.upgrade() else { return };
                if strong.last_activity() == last {
                    tracing::info!("idle timeout reached, logging out");
                    strong.logout(SessionAction::LoggedOut).await;
                    return;
                }
            }
        }
    }
}
