//! # campus-core
//!
//! Core crate for the Campus academic-management client. Contains the
//! seam traits (credential storage, HTTP transport, navigation), the
//! configuration schema, shared request/response and area types, and
//! the unified error system.
//!
//! This crate has **no** internal dependencies on other Campus crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
