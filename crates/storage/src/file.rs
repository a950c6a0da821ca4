use std::path::PathBuf;

use async_trait::async_trait;

use crate::{KeyValueStore, Result, StorageError};

/// File-backed key-value store.
///
/// Keeps one file per key inside a base directory. Keys are restricted to
/// a conservative character set so they map directly to file names.
#[derive(Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `base_dir`. The directory is created on
    /// first write, not here.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the directory the store writes into.
    pub fn base_dir(&self) -> &std::path::Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(key))
    }

    fn io_err(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err(key, e)),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| Self::io_err(key, e))?;

        // Write to a temp file then rename so readers never see a torn value.
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, &value)
            .await
            .map_err(|e| Self::io_err(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Self::io_err(key, e))?;

        tracing::debug!(key, bytes = value.len(), "persisted key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileKeyValueStore {
        let dir = std::env::temp_dir().join(format!("storefront-kv-{}", uuid::Uuid::new_v4()));
        FileKeyValueStore::new(dir)
    }

    #[tokio::test]
    async fn get_returns_none_before_first_write() {
        let store = temp_store();
        assert!(store.get("user_profile").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let store = temp_store();
        store.set("user_profile", b"{}".to_vec()).await.unwrap();
        assert_eq!(
            store.get("user_profile").await.unwrap(),
            Some(b"{}".to_vec())
        );
        tokio::fs::remove_dir_all(store.base_dir()).await.unwrap();
    }

    #[tokio::test]
    async fn remove_deletes_the_key() {
        let store = temp_store();
        store.set("k", b"v".to_vec()).await.unwrap();
        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
        tokio::fs::remove_dir_all(store.base_dir()).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_keys_with_path_separators() {
        let store = temp_store();
        let err = store.get("../escape").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
