//! Remote API configuration.

use serde::{Deserialize, Serialize};

/// Base URL and auth endpoint paths of the academic-management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Credential exchange endpoint.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Refresh-token exchange endpoint.
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Current profile endpoint.
    #[serde(default = "default_me_path")]
    pub me_path: String,
    /// Per-request timeout in seconds, enforced by the transport.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Join the base URL with an API path.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            refresh_path: default_refresh_path(),
            me_path: default_me_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_refresh_path() -> String {
    "/auth/refresh".to_string()
}

fn default_me_path() -> String {
    "/auth/me".to_string()
}

fn default_timeout() -> u64 {
    30
}
