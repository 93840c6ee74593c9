//! Storage key names for persisted credentials.
//!
//! Centralising key names keeps the writer (the session service) and the
//! readers (request authenticator, guards) on the same keys.

/// Key holding the short-lived access token.
pub const ACCESS_TOKEN: &str = "access_token";

/// Key holding the longer-lived refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Every key owned by the session, in clearing order.
pub const SESSION_KEYS: [&str; 2] = [ACCESS_TOKEN, REFRESH_TOKEN];
