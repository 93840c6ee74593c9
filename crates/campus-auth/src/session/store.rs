//! Storage of the access/refresh token pair.

use std::sync::Arc;

use serde::Serialize;

use campus_core::result::AppResult;
use campus_core::traits::CredentialStore;
use campus_store::keys;

/// Snapshot of the stored token pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Short-lived access token.
    pub access_token: Option<String>,
    /// Longer-lived refresh token.
    pub refresh_token: Option<String>,
}

/// Owns the two credential strings in the configured backend.
///
/// No validation is performed here; the session service is the only writer.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Underlying key-value backend.
    backend: Arc<dyn CredentialStore>,
}

impl SessionStore {
    /// Wrap a credential backend.
    pub fn new(backend: Arc<dyn CredentialStore>) -> Self {
        Self { backend }
    }

    /// The stored access token.
    pub fn get_access(&self) -> AppResult<Option<String>> {
        self.backend.get(keys::ACCESS_TOKEN)
    }

    /// The stored refresh token.
    pub fn get_refresh(&self) -> AppResult<Option<String>> {
        self.backend.get(keys::REFRESH_TOKEN)
    }

    /// Both tokens at once.
    pub fn credentials(&self) -> AppResult<Credentials> {
        Ok(Credentials {
            access_token: self.get_access()?,
            refresh_token: self.get_refresh()?,
        })
    }

    /// Overwrite both tokens.
    pub fn set_tokens(&self, access: &str, refresh: &str) -> AppResult<()> {
        self.backend.set_many(&[
            (keys::ACCESS_TOKEN, access),
            (keys::REFRESH_TOKEN, refresh),
        ])
    }

    /// Remove both tokens.
    pub fn clear(&self) -> AppResult<()> {
        self.backend.remove_many(&keys::SESSION_KEYS)
    }
}
