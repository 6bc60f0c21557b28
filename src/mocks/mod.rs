//! Mock providers for testing.
//!
//! In-memory implementations of the provider traits with scripted
//! results and call counters. Auth flows run at memory speed against
//! these; no network or filesystem involved.

pub mod storage;
pub mod transport;

pub use storage::MockSessionStore;
pub use transport::MockTransport;
