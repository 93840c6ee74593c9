//! Guard kinds and their outcomes.

use std::fmt;

use serde::Serialize;

use campus_core::types::{Area, Role};

/// Result of a route admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "area", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Enter the requested route.
    Allow,
    /// Do not enter; go to this area instead.
    RedirectTo(Area),
    /// Do not enter and do not navigate (the evaluation was superseded).
    Deny,
}

impl GuardOutcome {
    /// Whether the route may be entered.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// What a guard checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardKind {
    /// A live or refreshable session exists.
    Authenticated,
    /// The session's authorities include the role.
    Role(Role),
}

impl fmt::Display for GuardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => write!(f, "authenticated"),
            Self::Role(role) => write!(f, "role:{role}"),
        }
    }
}
