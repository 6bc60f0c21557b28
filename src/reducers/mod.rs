//! Session reducers.
//!
//! Pure transition functions for the session state machine.

pub mod session;

pub use session::SessionReducer;
