use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::Mutex;

use crate::errors::{ReadError, WriteError};

// Storage keys.
pub(crate) const ENTRIES_KEY: &str = "strive_lancamentos";
pub(crate) const ENTRIES_VERSION_KEY: &str = "strive_lancamentos_version";
pub(crate) const ENTRIES_HASH_KEY: &str = "strive_lancamentos_hash";
pub(crate) const CUSTOM_CATEGORIES_KEY: &str = "strive_custom_categories";
pub(crate) const IS_AUTHENTICATED_KEY: &str = "isAuthenticated";
pub(crate) const USER_EMAIL_KEY: &str = "userEmail";

/// Flat string key-value store. Values are overwritten wholesale; there is no
/// compare-and-swap, so concurrent writers to the same key race and the last
/// one wins.
#[async_trait]
pub trait StorageDatasource: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ServerError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), ServerError>;
    async fn remove(&self, key: &str) -> Result<(), ServerError>;
}

/// One `<key>.json` file per key under a data directory.
pub struct FileStorageDatasourceImpl {
    dir: PathBuf,
}

impl FileStorageDatasourceImpl {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl StorageDatasource for FileStorageDatasourceImpl {
    async fn get(&self, key: &str) -> Result<Option<String>, ServerError> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReadError::with_debug(key, &e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ServerError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| WriteError::with_debug(key, &e))?;
        tokio::fs::write(self.path(key), value)
            .await
            .map_err(|e| WriteError::with_debug(key, &e))
    }

    async fn remove(&self, key: &str) -> Result<(), ServerError> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WriteError::with_debug(key, &e)),
        }
    }
}

/// Process-local store, used by tests and by `StriveUtil::in_memory`.
#[derive(Default)]
pub struct MemoryStorageDatasourceImpl {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorageDatasourceImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageDatasource for MemoryStorageDatasourceImpl {
    async fn get(&self, key: &str) -> Result<Option<String>, ServerError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ServerError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ServerError> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_storage_treats_missing_keys_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorageDatasourceImpl::new(dir.path().join("nested"));

        assert_eq!(storage.get(ENTRIES_KEY).await.unwrap(), None);
        storage.remove(ENTRIES_KEY).await.unwrap();

        storage.set(ENTRIES_KEY, "[]").await.unwrap();
        assert_eq!(storage.get(ENTRIES_KEY).await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/strive_lancamentos.json").exists());

        storage.remove(ENTRIES_KEY).await.unwrap();
        assert_eq!(storage.get(ENTRIES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_storage_overwrites_values() {
        let storage = MemoryStorageDatasourceImpl::new();
        storage.set(USER_EMAIL_KEY, "a@b.com").await.unwrap();
        storage.set(USER_EMAIL_KEY, "c@d.com").await.unwrap();
        assert_eq!(storage.get(USER_EMAIL_KEY).await.unwrap().as_deref(), Some("c@d.com"));
    }
}
