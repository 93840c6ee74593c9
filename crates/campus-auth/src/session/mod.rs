//! Credential persistence and the session lifecycle (login, refresh,
//! logout, profile).

pub mod service;
pub mod store;

pub use service::{LoginResult, Profile, RefreshResult, SessionService};
pub use store::{Credentials, SessionStore};
