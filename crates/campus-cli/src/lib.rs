//! # campus-cli
//!
//! Terminal front end for the Campus session core: log in and out, inspect
//! the stored session, run route admission for a path, and send
//! authenticated API requests.

pub mod commands;
pub mod output;

pub use commands::Cli;
