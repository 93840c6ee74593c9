//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use campus_core::config::storage::StorageConfig;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_core::traits::CredentialStore;

/// Store manager that wraps the configured credential backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner storage backend.
    inner: Arc<dyn CredentialStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn CredentialStore> = match config.provider.as_str() {
            #[cfg(feature = "file")]
            "file" => {
                let path = config.credentials_path();
                info!(path = %path.display(), "Initializing profile-file credential store");
                Arc::new(crate::file::FileCredentialStore::open(path)?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory credential store");
                Arc::new(crate::memory::MemoryCredentialStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: file, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Wrap an existing backend.
    pub fn from_store(store: Arc<dyn CredentialStore>) -> Self {
        Self { inner: store }
    }
}

impl CredentialStore for StoreManager {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.inner.remove(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> AppResult<()> {
        self.inner.set_many(entries)
    }

    fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        self.inner.remove_many(keys)
    }
}
