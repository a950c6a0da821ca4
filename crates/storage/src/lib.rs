//! Persistence backends for the storefront domain.
//!
//! The domain treats persistence as an opaque key-value store: bytes in,
//! bytes out, keyed by short strings. Two implementations are provided:
//! an in-memory store for tests and sessions that don't need durability,
//! and a file-backed store that keeps one file per key.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{Result, StorageError};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use store::KeyValueStore;
