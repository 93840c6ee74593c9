//! # campus-store
//!
//! Credential storage backends for Campus. Supports two modes:
//!
//! - **file**: a JSON file in the client profile directory that survives
//!   restarts, cleared on logout
//! - **memory**: an in-process map for tests and throwaway sessions
//!
//! The backend is selected at runtime based on configuration.

#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::StoreManager;
