//! Route admission guards.
//!
//! A protected route runs a [`GuardChain`]: the generic
//! [`GuardKind::Authenticated`] guard first, then the area's role guard.
//! Each guard yields an explicit [`GuardOutcome`] instead of navigating.

pub mod chain;
pub mod outcome;
pub mod route_guard;

pub use chain::GuardChain;
pub use outcome::{GuardKind, GuardOutcome};
pub use route_guard::RouteGuard;
