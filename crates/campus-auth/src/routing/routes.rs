//! The client's route table.

use campus_core::types::{Area, Role};

use crate::guard::GuardKind;

/// Sections available under `/docentes` and `/estudiante`.
pub const AREA_SECTIONS: [&str; 3] = ["matriculaciones", "faltas", "notas"];

/// Section a bare area path opens.
pub const DEFAULT_SECTION: &str = "matriculaciones";

/// Admin tab a bare `/admin` opens.
pub const DEFAULT_ADMIN_TAB: &str = "usuarios";

/// How a path is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// Enter without checks.
    Public,
    /// Go to another path without entering this one.
    Redirect(String),
    /// Enter after every guard allows.
    Guarded(Vec<GuardKind>),
    /// Unknown path; the fallback router decides.
    Fallback,
}

/// Static route table for the admin, docente and estudiante areas.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteTable;

impl RouteTable {
    pub fn new() -> Self {
        Self
    }

    /// Match a path. Query strings, fragments and surrounding slashes are ignored.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => RouteMatch::Redirect(Area::Login.path().to_string()),
            ["login"] => RouteMatch::Public,
            ["admin"] => RouteMatch::Redirect(format!("/admin/{DEFAULT_ADMIN_TAB}")),
            ["admin", _tab] => RouteMatch::Guarded(guards_for(Role::Admin)),
            [area @ ("docentes" | "estudiante")] => {
                RouteMatch::Redirect(format!("/{area}/{DEFAULT_SECTION}"))
            }
            ["docentes", section] if AREA_SECTIONS.contains(section) => {
                RouteMatch::Guarded(guards_for(Role::Docente))
            }
            ["estudiante", section] if AREA_SECTIONS.contains(section) => {
                RouteMatch::Guarded(guards_for(Role::Estudiante))
            }
            _ => RouteMatch::Fallback,
        }
    }
}

fn guards_for(role: Role) -> Vec<GuardKind> {
    vec![GuardKind::Authenticated, GuardKind::Role(role)]
}
