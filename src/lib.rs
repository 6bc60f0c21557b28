//! # session-gate
//!
//! Client-side session/token lifecycle management: acquiring,
//! persisting, validating, refreshing, and invalidating a bearer
//! credential, and gating navigation on its state.
//!
//! ## Architecture
//!
//! The crate is a functional core with an imperative shell:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Controller executes effects
//! ```
//!
//! - [`SessionReducer`](reducers::SessionReducer): pure transitions of
//!   the `Loading / Authenticated / Unauthenticated / Error` machine
//! - [`SessionController`]: owns the state, talks to the store and
//!   transport, runs the refresh and idle timers
//! - [`gate::decide`]: pure route-gating decision function
//!
//! Dependencies are injected through [`SessionEnvironment`], so any
//! number of independent controllers can coexist and tests run against
//! in-memory mocks.
//!
//! ## Example
//!
//! ```no_run
//! use session_gate::{
//!     config::{SessionConfig, TransportConfig},
//!     providers::LoginRequest,
//!     stores::{FileBackend, LocalSessionStore},
//!     transport::HttpTransport,
//!     SessionController, SessionEnvironment,
//! };
//!
//! # async fn example() -> Result<(), session_gate::SessionError> {
//! let storage = LocalSessionStore::new(FileBackend::open("session.json"));
//! let transport = HttpTransport::new(TransportConfig::new("https://api.example.com/api/v1"));
//! let controller = SessionController::new(
//!     SessionEnvironment::new(storage, transport),
//!     SessionConfig::default(),
//! );
//!
//! controller.initialize().await;
//! let user = controller.login(LoginRequest::email("ada@example.com", "hunter2")).await?;
//! assert!(controller.is_authenticated());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod config;
pub mod constants;
pub mod controller;
pub mod effects;
pub mod environment;
pub mod error;
pub mod gate;
pub mod providers;
pub mod reducer;
pub mod reducers;
pub mod state;
pub mod stores;
pub mod transport;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use actions::SessionAction;
pub use config::SessionConfig;
pub use controller::SessionController;
pub use effects::{SessionEffect, SessionNotice};
pub use environment::SessionEnvironment;
pub use error::{Result, SessionError};
pub use gate::{decide, GateDecision, RouteRequirement};
pub use state::{Credential, SessionState, UserRecord};
