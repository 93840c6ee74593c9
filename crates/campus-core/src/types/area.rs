//! Top-level client areas and the roles that own them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles recognised by the client, matched as case-insensitive substrings
/// of authority strings (e.g. `ROLE_DOCENTE` contains `docente`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Teacher.
    Docente,
    /// Student.
    Estudiante,
}

impl Role {
    /// Priority order used when a user holds several roles.
    pub const PRIORITY: [Role; 3] = [Role::Admin, Role::Docente, Role::Estudiante];

    /// The lowercase keyword searched for in authority strings.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Docente => "docente",
            Self::Estudiante => "estudiante",
        }
    }

    /// The area this role lands in.
    pub fn area(&self) -> Area {
        match self {
            Self::Admin => Area::Admin,
            Self::Docente => Area::Docentes,
            Self::Estudiante => Area::Estudiante,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Role {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "docente" => Ok(Self::Docente),
            "estudiante" => Ok(Self::Estudiante),
            _ => Err(crate::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, docente, estudiante"
            ))),
        }
    }
}

/// Navigation targets the session core may redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    /// Administration area.
    Admin,
    /// Teacher area.
    Docentes,
    /// Student area, landing on grades.
    Estudiante,
    /// Login screen.
    Login,
}

impl Area {
    /// The route path of the area.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Docentes => "/docentes",
            Self::Estudiante => "/estudiante/notas",
            Self::Login => "/login",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
