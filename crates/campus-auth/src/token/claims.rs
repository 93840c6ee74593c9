//! Claims decoded from an access token payload, and the role claim shapes
//! shared with the server profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::authority::AuthoritySet;

/// A role-bearing claim value: an array of strings, or one string that may
/// hold several roles separated by commas, semicolons or whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    /// `["ROLE_ADMIN", "ROLE_DOCENTE"]`; non-string elements are ignored.
    List(Vec<serde_json::Value>),
    /// `"ROLE_ADMIN,ROLE_DOCENTE"`.
    Text(String),
    /// Any other JSON shape; carries no roles.
    Other(serde_json::Value),
}

impl RoleClaim {
    /// The role strings carried by this claim.
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::List(items) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(String::from)
                .collect(),
            Self::Text(text) => text
                .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(String::from)
                .collect(),
            Self::Other(_) => Vec::new(),
        }
    }
}

/// The known role-bearing keys of a payload.
///
/// [`RoleClaims::authority_set`] checks them in declaration order and the
/// first key yielding at least one role wins. No other key is inspected;
/// a payload with none of them has an empty authority set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorities: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol: Option<RoleClaim>,
    #[serde(
        default,
        rename = "rolesString",
        skip_serializing_if = "Option::is_none"
    )]
    pub roles_string: Option<RoleClaim>,
}

impl RoleClaims {
    /// Resolve the authority set from the first non-empty known key.
    pub fn authority_set(&self) -> AuthoritySet {
        [
            &self.authorities,
            &self.roles,
            &self.role,
            &self.rol,
            &self.roles_string,
        ]
        .into_iter()
        .flatten()
        .map(|claim| AuthoritySet::new(claim.values()))
        .find(|set| !set.is_empty())
        .unwrap_or_default()
    }
}

/// Claims payload of an access token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, usually the user's e-mail or ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiration (seconds since epoch). Fractional values are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
    /// Issued-at (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<f64>,
    /// Role-bearing claims.
    #[serde(flatten)]
    pub role_claims: RoleClaims,
}

impl Claims {
    /// The user's authorities.
    pub fn authorities(&self) -> AuthoritySet {
        self.role_claims.authority_set()
    }

    /// Expiration as a timestamp, if the claim is present and representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
            .and_then(|exp| DateTime::from_timestamp(exp.floor() as i64, 0))
    }

    /// Whether the token is expired at `now` (seconds since epoch).
    ///
    /// A missing `exp` counts as expired; `exp == now` is expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.exp {
            Some(exp) if exp.is_finite() => exp <= now as f64,
            _ => true,
        }
    }
}
