//! Session environment.
//!
//! Dependency injection for the session controller. Any number of
//! independent environments (and controllers) can coexist, which is
//! what makes the machine testable without ambient globals.

use crate::providers::{AuthTransport, SessionStore};

/// External dependencies of the session controller.
///
/// # Type Parameters
///
/// - `S`: Session store
/// - `T`: Auth transport
#[derive(Debug, Clone)]
pub struct SessionEnvironment<S, T>
where
    S: SessionStore,
    T: AuthTransport,
{
    /// Durable session persistence.
    pub storage: S,

    /// Network collaborator.
    pub transport: T,
}

impl<S, T> SessionEnvironment<S, T>
where
    S: SessionStore,
    T: AuthTransport,
{
    /// Create a new session environment.
    #[must_use]
    pub const fn new(storage: S, transport: T) -> Self {
        Self { storage, transport }
    }
}
