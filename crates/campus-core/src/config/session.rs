//! Session behaviour configuration.

use serde::{Deserialize, Serialize};

/// Session behaviour configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where role guards read authorities from.
    #[serde(default)]
    pub authority_source: AuthoritySource,
    /// Whether concurrent 401s share a single refresh exchange.
    #[serde(default = "default_true")]
    pub coalesce_refresh: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            authority_source: AuthoritySource::default(),
            coalesce_refresh: true,
        }
    }
}

/// Source of the authority set consulted by role guards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthoritySource {
    /// Decode the local access token claims.
    Claims,
    /// Confirm against the server profile endpoint.
    #[default]
    Profile,
}

fn default_true() -> bool {
    true
}
