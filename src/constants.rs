//! Session constants.
//!
//! Endpoint paths, persisted storage keys, and route paths used across
//! the crate.

/// REST endpoint paths on the auth backend.
pub mod endpoints {
    /// Login endpoint (`POST`).
    pub const LOGIN: &str = "/login";

    /// Registration endpoint (`POST`).
    pub const REGISTER: &str = "/register";

    /// Best-effort server-side session invalidation (`POST`).
    pub const LOGOUT: &str = "/logout";

    /// Token refresh endpoint (`POST`).
    pub const REFRESH: &str = "/refresh";

    /// Profile endpoint (`GET`), used to validate restored credentials.
    pub const PROFILE: &str = "/profile";
}

/// Keys under which the session is persisted.
pub mod storage_keys {
    /// Prefix applied to every key owned by this crate.
    pub const PREFIX: &str = "session_";

    /// Key for the bearer token entry.
    pub const CREDENTIAL: &str = "auth_token";

    /// Key for the user record entry.
    pub const USER: &str = "user_data";
}

/// Route paths consumed by the route gate.
pub mod routes {
    /// Public landing view.
    pub const HOME: &str = "/";

    /// Login form; redirect target for unauthenticated access.
    pub const LOGIN: &str = "/login";

    /// Registration form.
    pub const REGISTER: &str = "/register";

    /// Default authenticated landing view.
    pub const DASHBOARD: &str = "/dashboard";

    /// Shown when admin access is required but missing.
    pub const UNAUTHORIZED: &str = "/unauthorized";

    /// Shown when email verification is required but missing.
    pub const VERIFY_EMAIL: &str = "/verify-email";

    /// Auth-form routes that authenticated users are redirected away from.
    pub const AUTH_RESTRICTED: &[&str] = &[LOGIN, REGISTER];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(endpoints::LOGIN, "/login");
        assert_eq!(endpoints::REFRESH, "/refresh");
        assert_eq!(endpoints::PROFILE, "/profile");
    }

    #[test]
    fn test_storage_keys_are_prefixable() {
        let key = format!("{}{}", storage_keys::PREFIX, storage_keys::CREDENTIAL);
        assert_eq!(key, "session_auth_token");
    }

    #[test]
    fn test_auth_restricted_routes() {
        assert!(routes::AUTH_RESTRICTED.contains(&routes::LOGIN));
        assert!(routes::AUTH_RESTRICTED.contains(&routes::REGISTER));
        assert!(!routes::AUTH_RESTRICTED.contains(&routes::DASHBOARD));
    }
}
