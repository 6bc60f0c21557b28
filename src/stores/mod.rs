//! Session store implementations.
//!
//! [`LocalSessionStore`] implements the store contract on top of any
//! [`crate::providers::StorageBackend`]; [`MemoryBackend`] and
//! [`FileBackend`] are the two bundled backends.

pub mod file;
pub mod local;
pub mod memory;

pub use file::FileBackend;
pub use local::LocalSessionStore;
pub use memory::MemoryBackend;
