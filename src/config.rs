//! Session configuration.
//!
//! Configuration values should be provided by the application, not
//! hardcoded at the call sites.

use std::time::Duration;

/// Session lifecycle configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Proactive token refresh interval while authenticated.
    ///
    /// Must sit well inside the server-side token lifetime so an
    /// in-flight user session does not 401 mid-use.
    ///
    /// Default: 15 minutes
    pub refresh_interval: Duration,

    /// Inactivity window before automatic logout.
    ///
    /// Default: 30 minutes
    pub idle_timeout: Duration,

    /// How long before the idle deadline the warning notice fires.
    ///
    /// Default: 5 minutes
    pub idle_warning_lead: Duration,

    /// How long persisted session entries stay readable.
    ///
    /// Default: 7 days
    pub storage_ttl: chrono::Duration,

    /// Validate a restored credential against the profile endpoint
    /// during hydration.
    ///
    /// Default: true
    pub validate_on_hydrate: bool,
}

impl SessionConfig {
    /// Create a configuration with the defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            refresh_interval: Duration::from_secs(15 * 60),
            idle_timeout: Duration::from_secs(30 * 60),
            idle_warning_lead: Duration::from_secs(5 * 60),
            storage_ttl: chrono::Duration::days(7),
            validate_on_hydrate: true,
        }
    }

    /// Set the proactive refresh interval.
    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the inactivity window.
    #[must_use]
    pub const fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the idle warning lead time.
    #[must_use]
    pub const fn with_idle_warning_lead(mut self, lead: Duration) -> Self {
        self.idle_warning_lead = lead;
        self
    }

    /// Set the persisted entry lifetime.
    #[must_use]
    pub const fn with_storage_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.storage_ttl = ttl;
        self
    }

    /// Enable or disable boot-time credential validation.
    #[must_use]
    pub const fn with_validate_on_hydrate(mut self, validate: bool) -> Self {
        self.validate_on_hydrate = validate;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL of the auth backend (e.g. `https://api.example.com/api/v1`).
    pub base_url: String,

    /// Per-request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,
}

impl TransportConfig {
    /// Create a transport configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.refresh_interval, Duration::from_secs(900));
        assert_eq!(config.idle_timeout, Duration::from_secs(1800));
        assert_eq!(config.idle_warning_lead, Duration::from_secs(300));
        assert_eq!(config.storage_ttl, chrono::Duration::days(7));
        assert!(config.validate_on_hydrate);
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new()
            .with_refresh_interval(Duration::from_secs(60))
            .with_idle_timeout(Duration::from_secs(120))
            .with_idle_warning_lead(Duration::from_secs(30))
            .with_storage_ttl(chrono::Duration::days(1))
            .with_validate_on_hydrate(false);

        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.idle_timeout, Duration::from_secs(120));
        assert_eq!(config.idle_warning_lead, Duration::from_secs(30));
        assert_eq!(config.storage_ttl, chrono::Duration::days(1));
        assert!(!config.validate_on_hydrate);
    }

    #[test]
    fn test_transport_config_builder() {
        let config = TransportConfig::new("https://api.example.com/api/v1")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://api.example.com/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
