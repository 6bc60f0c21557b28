//! Route gating.
//!
//! [`decide`] is a pure function of the session state, the route's
//! declared requirement, and the current path. It performs no storage
//! or network access and consults no clock, which is what makes it
//! trivially testable.

use crate::constants::routes;
use crate::state::SessionState;

/// Declarative access requirement attached to a navigable view.
///
/// Defined at route-registration time; read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteRequirement {
    /// The view needs an authenticated session.
    pub require_auth: bool,

    /// The view needs an admin user. Implies authentication.
    pub require_admin: bool,

    /// The view needs a verified email. Implies authentication.
    pub require_verified: bool,
}

impl RouteRequirement {
    /// Publicly reachable view.
    pub const PUBLIC: Self = Self {
        require_auth: false,
        require_admin: false,
        require_verified: false,
    };

    /// View behind authentication.
    pub const AUTHENTICATED: Self = Self {
        require_auth: true,
        require_admin: false,
        require_verified: false,
    };

    /// View behind admin privileges.
    pub const ADMIN: Self = Self {
        require_auth: true,
        require_admin: true,
        require_verified: false,
    };

    /// View behind email verification.
    pub const VERIFIED: Self = Self {
        require_auth: true,
        require_admin: false,
        require_verified: true,
    };
}

/// Outcome of a gating decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the requested view.
    Render,

    /// Session resolution is in flight; show a neutral waiting
    /// indicator and decide again on the next state change.
    Wait,

    /// Navigate elsewhere instead of rendering.
    Redirect {
        /// Redirect target path.
        to: String,

        /// Path to return to after authentication, when applicable.
        return_to: Option<String>,
    },
}

impl GateDecision {
    fn redirect(to: &str) -> Self {
        Self::Redirect {
            to: to.to_string(),
            return_to: None,
        }
    }

    fn redirect_with_return(to: &str, return_to: &str) -> Self {
        Self::Redirect {
            to: to.to_string(),
            return_to: Some(return_to.to_string()),
        }
    }
}

/// Decide whether `current_path` may render under `state`.
///
/// Rules are evaluated in order; the first match wins:
///
/// 1. `Loading` → [`GateDecision::Wait`]
/// 2. auth required, not authenticated → redirect to login, remembering
///    the current path
/// 3. admin required, user is not admin → redirect to unauthorized
/// 4. verification required, user not verified → redirect to
///    verify-email
/// 5. authenticated on a login/register route → redirect to the
///    default authenticated landing view
/// 6. otherwise → render
#[must_use]
pub fn decide(
    state: &SessionState,
    requirement: RouteRequirement,
    current_path: &str,
) -> GateDecision {
    if state.is_loading() {
        return GateDecision::Wait;
    }

    if requirement.require_auth && !state.is_authenticated() {
        return GateDecision::redirect_with_return(routes::LOGIN, current_path);
    }

    if requirement.require_admin {
        match state.user() {
            None => return GateDecision::redirect_with_return(routes::LOGIN, current_path),
            Some(user) if !user.is_admin => {
                return GateDecision::redirect(routes::UNAUTHORIZED);
            }
            Some(_) => {}
        }
    }

    if requirement.require_verified {
        match state.user() {
            None => return GateDecision::redirect_with_return(routes::LOGIN, current_path),
            Some(user) if !user.is_verified => {
                return GateDecision::redirect(routes::VERIFY_EMAIL);
            }
            Some(_) => {}
        }
    }

    if state.is_authenticated() && routes::AUTH_RESTRICTED.contains(&current_path) {
        return GateDecision::redirect(routes::DASHBOARD);
    }

    GateDecision::Render
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Credential, UserRecord};

    fn authenticated(is_admin: bool, is_verified: bool) -> SessionState {
        SessionState::Authenticated {
            credential: Credential::new("T1"),
            user: UserRecord {
                id: 1,
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                is_admin,
                is_verified,
                created_at: None,
            },
        }
    }

    #[test]
    fn test_loading_waits() {
        assert_eq!(
            decide(&SessionState::Loading, RouteRequirement::AUTHENTICATED, "/dashboard"),
            GateDecision::Wait
        );
    }

    #[test]
    fn test_protected_route_redirects_with_return_path() {
        let decision = decide(
            &SessionState::Unauthenticated,
            RouteRequirement::AUTHENTICATED,
            "/dashboard",
        );
        assert_eq!(
            decision,
            GateDecision::Redirect {
                to: "/login".to_string(),
                return_to: Some("/dashboard".to_string()),
            }
        );
    }

    #[test]
    fn test_error_state_is_treated_as_unauthenticated() {
        let state = SessionState::Error {
            message: "boom".to_string(),
        };
        assert!(matches!(
            decide(&state, RouteRequirement::AUTHENTICATED, "/dashboard"),
            GateDecision::Redirect { .. }
        ));
    }

    #[test]
    fn test_admin_route_rejects_non_admin() {
        let decision = decide(
            &authenticated(false, true),
            RouteRequirement::ADMIN,
            "/admin",
        );
        assert_eq!(decision, GateDecision::redirect("/unauthorized"));
    }

    #[test]
    fn test_admin_route_admits_admin() {
        let decision = decide(&authenticated(true, true), RouteRequirement::ADMIN, "/admin");
        assert_eq!(decision, GateDecision::Render);
    }

    #[test]
    fn test_admin_without_session_goes_to_login_not_unauthorized() {
        // Rule 2/3 ordering: no session means login first, even for
        // admin-only routes declared without require_auth.
        let requirement = RouteRequirement {
            require_admin: true,
            ..RouteRequirement::PUBLIC
        };
        assert!(matches!(
            decide(&SessionState::Unauthenticated, requirement, "/admin"),
            GateDecision::Redirect { to, .. } if to == "/login"
        ));
    }

    #[test]
    fn test_unverified_user_goes_to_verify_email() {
        let decision = decide(
            &authenticated(false, false),
            RouteRequirement::VERIFIED,
            "/settings",
        );
        assert_eq!(decision, GateDecision::redirect("/verify-email"));
    }

    #[test]
    fn test_admin_check_precedes_verified_check() {
        let requirement = RouteRequirement {
            require_auth: true,
            require_admin: true,
            require_verified: true,
        };
        let decision = decide(&authenticated(false, false), requirement, "/admin");
        assert_eq!(decision, GateDecision::redirect("/unauthorized"));
    }

    #[test]
    fn test_authenticated_user_is_bounced_off_auth_forms() {
        for path in ["/login", "/register"] {
            let decision = decide(&authenticated(false, true), RouteRequirement::PUBLIC, path);
            assert_eq!(decision, GateDecision::redirect("/dashboard"));
        }
    }

    #[test]
    fn test_unauthenticated_user_may_see_auth_forms() {
        let decision = decide(&SessionState::Unauthenticated, RouteRequirement::PUBLIC, "/login");
        assert_eq!(decision, GateDecision::Render);
    }

    #[test]
    fn test_public_route_renders_for_everyone() {
        for state in [
            SessionState::Unauthenticated,
            authenticated(false, false),
        ] {
            assert_eq!(
                decide(&state, RouteRequirement::PUBLIC, "/"),
                GateDecision::Render
            );
        }
    }

    #[test]
    fn test_decide_is_pure() {
        let state = authenticated(true, true);
        let first = decide(&state, RouteRequirement::ADMIN, "/admin");
        for _ in 0..10 {
            assert_eq!(decide(&state, RouteRequirement::ADMIN, "/admin"), first);
        }
    }
}
