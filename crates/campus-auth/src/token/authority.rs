//! Normalized authority sets and role matching.

use serde::Serialize;

use campus_core::types::{Area, Role};

/// The authority strings held by a user, as found in token claims or the
/// server profile.
///
/// Matching is a case-insensitive substring test against the role keywords,
/// so `ROLE_DOCENTE`, `docente` and `Docente` all grant [`Role::Docente`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthoritySet {
    entries: Vec<String>,
}

impl AuthoritySet {
    /// Build a set from raw authority strings, dropping blanks and duplicates.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for entry in entries {
            let entry: String = entry.into();
            let trimmed = entry.trim();
            if !trimmed.is_empty() && !set.entries.iter().any(|e| e == trimmed) {
                set.entries.push(trimmed.to_string());
            }
        }
        set
    }

    /// Whether no authority was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The authority strings as received.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether any authority contains the role's keyword.
    pub fn contains_role(&self, role: Role) -> bool {
        let keyword = role.keyword();
        self.entries
            .iter()
            .any(|entry| entry.to_lowercase().contains(keyword))
    }

    /// All authorities joined into one lowercase string.
    pub fn joined(&self) -> String {
        self.entries.join(" ").to_lowercase()
    }

    /// The highest-privilege role present: admin, then docente, then estudiante.
    pub fn primary_role(&self) -> Option<Role> {
        let joined = self.joined();
        Role::PRIORITY
            .into_iter()
            .find(|role| joined.contains(role.keyword()))
    }

    /// The area this authority set lands in; `/login` when no role is recognised.
    pub fn area(&self) -> Area {
        self.primary_role().map_or(Area::Login, |role| role.area())
    }
}

impl<S: Into<String>> FromIterator<S> for AuthoritySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
