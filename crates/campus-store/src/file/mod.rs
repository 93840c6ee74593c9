//! Profile-file credential storage.

pub mod store;

pub use store::FileCredentialStore;
