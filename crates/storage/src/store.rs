use async_trait::async_trait;

use crate::Result;

/// Core trait for key-value store implementations.
///
/// The domain layer serializes records (the user profile, for instance)
/// to bytes and stores them under fixed keys. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Removes the value stored under `key`.
    ///
    /// Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<()>;
}
