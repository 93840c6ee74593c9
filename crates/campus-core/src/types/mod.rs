//! Shared domain types used across Campus crates.

pub mod area;
pub mod request;

pub use area::{Area, Role};
pub use request::{ApiRequest, ApiResponse};
