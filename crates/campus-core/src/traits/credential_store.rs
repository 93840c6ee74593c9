//! Key-value storage trait for persisted credentials.

use crate::result::AppResult;

/// Trait for credential storage backends (profile file or in-memory).
///
/// This is dumb storage: no validation happens here. All operations are
/// synchronous and only touch the backend's own key space.
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key is absent.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Set several values in one write.
    fn set_many(&self, entries: &[(&str, &str)]) -> AppResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove several keys in one write.
    fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
