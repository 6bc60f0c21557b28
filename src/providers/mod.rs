//! Provider traits.
//!
//! All external dependencies of the session controller are abstracted
//! behind traits and injected via [`crate::environment::SessionEnvironment`].

pub mod storage;
pub mod transport;

pub use storage::{PersistedSession, SaveOptions, SessionStore, StorageBackend};
pub use transport::{AuthPayload, AuthTransport, LoginIdentity, LoginRequest, RegisterRequest};
