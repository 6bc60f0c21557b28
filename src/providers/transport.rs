//! Auth transport trait and wire types.

use crate::error::Result;
use crate::state::{Credential, UserRecord};
use serde::Serialize;
use std::future::Future;

/// Identity half of a login request.
///
/// The backend accepts either an email address or a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentity {
    /// Email address.
    Email(String),
    /// Phone number.
    Phone(String),
}

impl LoginIdentity {
    /// The JSON field name this identity is sent under.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
        }
    }

    /// The identity value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Email(value) | Self::Phone(value) => value,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Email or phone identity.
    pub identity: LoginIdentity,
    /// Plain-text password; only ever sent over the transport.
    pub password: String,
}

impl LoginRequest {
    /// Log in with an email address.
    #[must_use]
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identity: LoginIdentity::Email(email.into()),
            password: password.into(),
        }
    }

    /// Log in with a phone number.
    #[must_use]
    pub fn phone(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identity: LoginIdentity::Phone(phone.into()),
            password: password.into(),
        }
    }
}

/// Registration request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Credential/user pair returned by login and register.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPayload {
    /// Issued bearer token.
    pub credential: Credential,
    /// User record from the response.
    pub user: UserRecord,
}

/// Network collaborator for the session controller.
///
/// Implementations carry `Authorization: Bearer <token>` whenever a
/// credential is supplied. Retry/backoff mechanics are out of scope
/// here; the controller owns the single 401 → refresh → logout
/// sequence.
pub trait AuthTransport: Send + Sync {
    /// `POST /login`.
    ///
    /// # Errors
    ///
    /// - [`crate::SessionError::InvalidCredentials`] when rejected
    /// - [`crate::SessionError::ValidationError`] on field errors
    /// - [`crate::SessionError::NetworkUnavailable`] when no response arrives
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<AuthPayload>> + Send;

    /// `POST /register`.
    ///
    /// # Errors
    ///
    /// Same contract as [`AuthTransport::login`], distinct endpoint.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthPayload>> + Send;

    /// `POST /logout`, best-effort server-side invalidation.
    ///
    /// # Errors
    ///
    /// Returns transport errors; the controller swallows them.
    fn logout(&self, credential: &Credential) -> impl Future<Output = Result<()>> + Send;

    /// `POST /refresh`, exchanging the current credential for a new one.
    ///
    /// # Errors
    ///
    /// - [`crate::SessionError::Unauthorized`] when the token is no longer valid
    /// - [`crate::SessionError::NetworkUnavailable`] when no response arrives
    fn refresh(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Credential>> + Send;

    /// `GET /profile`, fetching the current user record.
    ///
    /// # Errors
    ///
    /// - [`crate::SessionError::Unauthorized`] when the token is rejected
    /// - [`crate::SessionError::NetworkUnavailable`] when no response arrives
    fn profile(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<UserRecord>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_identity_field_names() {
        let request = LoginRequest::email("a@b.com", "x");
        assert_eq!(request.identity.field_name(), "email");
        assert_eq!(request.identity.value(), "a@b.com");

        let request = LoginRequest::phone("+15550100", "x");
        assert_eq!(request.identity.field_name(), "phone");
    }
}
