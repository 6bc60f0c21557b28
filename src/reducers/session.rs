//! Session state machine reducer.
//!
//! Implements every transition of the four-state machine
//! (`Loading` / `Authenticated` / `Unauthenticated` / `Error`).
//!
//! # Transition table
//!
//! | Action | Next state | Effects |
//! |---|---|---|
//! | `HydrationStarted`, `AuthStarted` | `Loading` | — |
//! | `HydrationSucceeded`, `AuthSucceeded` | `Authenticated` | persist, arm timers |
//! | `HydrationFailed` | `Unauthenticated` | clear storage, disarm |
//! | `AuthFailed` | `Error` | disarm (storage untouched) |
//! | `TokenRefreshed` | `Authenticated` (new token, same user) | persist, re-arm |
//! | `UserUpdated` | `Authenticated` (same token, new user) | persist |
//! | `SessionExpired` | `Unauthenticated` | clear, disarm, notify |
//! | `LoggedOut` | `Unauthenticated` | clear, disarm |
//! | `IdleWarning` | unchanged | notify |
//! | `ErrorCleared` | `Error` → `Unauthenticated` | — |

use crate::actions::SessionAction;
use crate::effects::{SessionEffect, SessionNotice};
use crate::reducer::Reducer;
use crate::state::SessionState;
use smallvec::{smallvec, SmallVec};

/// Session state machine reducer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionReducer;

impl SessionReducer {
    /// Create a new session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Effect = SessionEffect;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
    ) -> SmallVec<[Self::Effect; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // Loading entry points
            // ═══════════════════════════════════════════════════════════
            SessionAction::HydrationStarted | SessionAction::AuthStarted => {
                *state = SessionState::Loading;
                smallvec![]
            }

            // ═══════════════════════════════════════════════════════════
            // Entering Authenticated
            // ═══════════════════════════════════════════════════════════
            SessionAction::HydrationSucceeded { credential, user }
            | SessionAction::AuthSucceeded { credential, user } => {
                tracing::debug!(user_id = user.id, "session authenticated");
                *state = SessionState::Authenticated {
                    credential: credential.clone(),
                    user: user.clone(),
                };
                smallvec![
                    SessionEffect::Persist { credential, user },
                    SessionEffect::ArmTimers,
                ]
            }

            // ═══════════════════════════════════════════════════════════
            // Failure paths
            // ═══════════════════════════════════════════════════════════
            SessionAction::HydrationFailed => {
                tracing::debug!("hydration found no usable session");
                *state = SessionState::Unauthenticated;
                smallvec![SessionEffect::ClearStorage, SessionEffect::DisarmTimers]
            }

            SessionAction::AuthFailed { error } => {
                // Nothing is persisted on a failed login/register.
                tracing::debug!(error = %error, "authentication failed");
                *state = SessionState::Error {
                    message: error.to_string(),
                };
                smallvec![SessionEffect::DisarmTimers]
            }

            // ═══════════════════════════════════════════════════════════
            // Session maintenance
            // ═══════════════════════════════════════════════════════════
            SessionAction::TokenRefreshed { credential } => match state {
                SessionState::Authenticated { user, .. } => {
                    let user = user.clone();
                    *state = SessionState::Authenticated {
                        credential: credential.clone(),
                        user: user.clone(),
                    };
                    smallvec![
                        SessionEffect::Persist { credential, user },
                        SessionEffect::ArmTimers,
                    ]
                }
                _ => {
                    // Refresh resolved after logout; last write wins.
                    tracing::warn!("TokenRefreshed outside Authenticated, ignoring");
                    smallvec![]
                }
            },

            SessionAction::UserUpdated { user } => match state {
                SessionState::Authenticated { credential, .. } => {
                    let credential = credential.clone();
                    *state = SessionState::Authenticated {
                        credential: credential.clone(),
                        user: user.clone(),
                    };
                    smallvec![SessionEffect::Persist { credential, user }]
                }
                _ => {
                    tracing::warn!("UserUpdated outside Authenticated, ignoring");
                    smallvec![]
                }
            },

            SessionAction::IdleWarning { remaining } => {
                smallvec![SessionEffect::Notify(SessionNotice::IdleWarning {
                    remaining,
                })]
            }

            // ═══════════════════════════════════════════════════════════
            // Leaving Authenticated
            // ═══════════════════════════════════════════════════════════
            SessionAction::SessionExpired => {
                tracing::info!("session expired after failed refresh");
                *state = SessionState::Unauthenticated;
                smallvec![
                    SessionEffect::ClearStorage,
                    SessionEffect::DisarmTimers,
                    SessionEffect::Notify(SessionNotice::SessionExpired),
                ]
            }

            SessionAction::LoggedOut => {
                tracing::info!("logged out");
                *state = SessionState::Unauthenticated;
                smallvec![SessionEffect::ClearStorage, SessionEffect::DisarmTimers]
            }

            SessionAction::ErrorCleared => {
                if let SessionState::Error { .. } = state {
                    *state = SessionState::Unauthenticated;
                }
                smallvec![]
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::state::{Credential, UserRecord};
    use std::time::Duration;

    fn user() -> UserRecord {
        UserRecord {
            id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            is_admin: false,
            is_verified: true,
            created_at: None,
        }
    }

    fn authenticated() -> SessionState {
        SessionState::Authenticated {
            credential: Credential::new("T1"),
            user: user(),
        }
    }

    #[test]
    fn test_auth_started_enters_loading() {
        let reducer = SessionReducer::new();
        let mut state = SessionState::Unauthenticated;
        let effects = reducer.reduce(&mut state, SessionAction::AuthStarted);
        assert!(state.is_loading());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_auth_succeeded_persists_and_arms_timers() {
        let reducer = SessionReducer::new();
        let mut state = SessionState::Loading;
        let effects = reducer.reduce(
            &mut state,
            SessionAction::AuthSucceeded {
                credential: Credential::new("T1"),
                user: user(),
            },
        );

        assert!(state.is_authenticated());
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[0], SessionEffect::Persist { .. }));
        assert_eq!(effects[1], SessionEffect::ArmTimers);
    }

    #[test]
    fn test_auth_failed_surfaces_message_and_leaves_storage_alone() {
        let reducer = SessionReducer::new();
        let mut state = SessionState::Loading;
        let effects = reducer.reduce(
            &mut state,
            SessionAction::AuthFailed {
                error: SessionError::invalid_credentials(),
            },
        );

        assert_eq!(
            state,
            SessionState::Error {
                message: "Invalid credentials".to_string()
            }
        );
        // No ClearStorage and no Persist: a failed login must not touch storage.
        assert!(!effects.contains(&SessionEffect::ClearStorage));
        assert!(!effects
            .iter()
            .any(|e| matches!(e, SessionEffect::Persist { .. })));
    }

    #[test]
    fn test_hydration_failed_clears_storage() {
        let reducer = SessionReducer::new();
        let mut state = SessionState::Loading;
        let effects = reducer.reduce(&mut state, SessionAction::HydrationFailed);
        assert_eq!(state, SessionState::Unauthenticated);
        assert!(effects.contains(&SessionEffect::ClearStorage));
    }

    #[test]
    fn test_refresh_replaces_credential_keeps_user() {
        let reducer = SessionReducer::new();
        let mut state = authenticated();
        let effects = reducer.reduce(
            &mut state,
            SessionAction::TokenRefreshed {
                credential: Credential::new("T2"),
            },
        );

        assert_eq!(state.credential().unwrap().as_str(), "T2");
        assert_eq!(state.user().unwrap(), &user());
        assert!(effects.contains(&SessionEffect::ArmTimers));
    }

    #[test]
    fn test_late_refresh_after_logout_is_ignored() {
        let reducer = SessionReducer::new();
        let mut state = SessionState::Unauthenticated;
        let effects = reducer.reduce(
            &mut state,
            SessionAction::TokenRefreshed {
                credential: Credential::new("T2"),
            },
        );
        assert_eq!(state, SessionState::Unauthenticated);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_logged_out_clears_and_disarms() {
        let reducer = SessionReducer::new();
        let mut state = authenticated();
        let effects = reducer.reduce(&mut state, SessionAction::LoggedOut);
        assert_eq!(state, SessionState::Unauthenticated);
        assert!(effects.contains(&SessionEffect::ClearStorage));
        assert!(effects.contains(&SessionEffect::DisarmTimers));
    }

    #[test]
    fn test_session_expired_notifies_once() {
        let reducer = SessionReducer::new();
        let mut state = authenticated();
        let effects = reducer.reduce(&mut state, SessionAction::SessionExpired);
        assert_eq!(state, SessionState::Unauthenticated);
        assert_eq!(
            effects
                .iter()
                .filter(|e| matches!(e, SessionEffect::Notify(SessionNotice::SessionExpired)))
                .count(),
            1
        );
    }

    #[test]
    fn test_user_updated_persists_under_same_credential() {
        let reducer = SessionReducer::new();
        let mut state = authenticated();
        let renamed = UserRecord {
            name: "Ada".to_string(),
            ..user()
        };
        let effects = reducer.reduce(
            &mut state,
            SessionAction::UserUpdated {
                user: renamed.clone(),
            },
        );

        assert_eq!(state.user().unwrap().name, "Ada");
        assert_eq!(state.credential().unwrap().as_str(), "T1");
        assert_eq!(
            effects.as_slice(),
            [SessionEffect::Persist {
                credential: Credential::new("T1"),
                user: renamed,
            }]
        );
    }

    #[test]
    fn test_idle_warning_changes_nothing_but_notifies() {
        let reducer = SessionReducer::new();
        let mut state = authenticated();
        let before = state.clone();
        let effects = reducer.reduce(
            &mut state,
            SessionAction::IdleWarning {
                remaining: Duration::from_secs(300),
            },
        );
        assert_eq!(state, before);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_error_cleared_only_from_error_state() {
        let reducer = SessionReducer::new();

        let mut state = SessionState::Error {
            message: "boom".to_string(),
        };
        reducer.reduce(&mut state, SessionAction::ErrorCleared);
        assert_eq!(state, SessionState::Unauthenticated);

        let mut state = authenticated();
        reducer.reduce(&mut state, SessionAction::ErrorCleared);
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_reduce_is_deterministic() {
        let reducer = SessionReducer::new();
        for _ in 0..3 {
            let mut state = SessionState::Loading;
            let effects = reducer.reduce(
                &mut state,
                SessionAction::AuthSucceeded {
                    credential: Credential::new("T1"),
                    user: user(),
                },
            );
            assert!(state.is_authenticated());
            assert_eq!(effects.len(), 2);
        }
    }
}
