//! In-memory credential storage.

pub mod store;

pub use store::MemoryCredentialStore;
