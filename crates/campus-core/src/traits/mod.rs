//! Core traits defined in `campus-core` and implemented by other crates.

pub mod credential_store;
pub mod navigator;
pub mod transport;

pub use credential_store::CredentialStore;
pub use navigator::Navigator;
pub use transport::HttpTransport;
