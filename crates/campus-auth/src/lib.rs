//! # campus-auth
//!
//! Client-side session core for the Campus academic-management client.
//!
//! ## Modules
//!
//! - `token`: compact token decoding, claims, authority sets, expiry
//! - `session`: credential persistence and the session service
//!   (login, refresh, logout, profile)
//! - `interceptor`: bearer attachment with a single refresh-and-retry on 401
//! - `transport`: reqwest-backed HTTP transport
//! - `guard`: per-area route admission checks
//! - `routing`: role-to-area fallback table, route table, cancellable router

pub mod guard;
pub mod interceptor;
pub mod routing;
pub mod session;
pub mod token;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use guard::{GuardChain, GuardKind, GuardOutcome, RouteGuard};
pub use interceptor::RequestAuthenticator;
pub use routing::{
    FallbackRouter, NavigationHistory, NavigationOutcome, RouteMatch, RouteTable, Router, area_for,
};
pub use session::{Credentials, LoginResult, Profile, RefreshResult, SessionService, SessionStore};
pub use token::{AuthoritySet, Claims};
pub use transport::ReqwestTransport;
