//! Credential storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the access/refresh token pair is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend: `"file"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Client profile directory holding the credentials file.
    #[serde(default = "default_profile_dir")]
    pub profile_dir: String,
    /// Credentials file name inside the profile directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl StorageConfig {
    /// Full path of the credentials file.
    pub fn credentials_path(&self) -> PathBuf {
        PathBuf::from(&self.profile_dir).join(&self.file_name)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            profile_dir: default_profile_dir(),
            file_name: default_file_name(),
        }
    }
}

fn default_provider() -> String {
    "file".to_string()
}

fn default_profile_dir() -> String {
    ".campus".to_string()
}

fn default_file_name() -> String {
    "credentials.json".to_string()
}
