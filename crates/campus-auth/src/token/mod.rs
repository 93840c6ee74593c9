//! Compact token decoding, claims, and authority extraction.
//!
//! Tokens are treated as opaque-but-decodable: the payload segment is read,
//! the signature is never verified.

pub mod authority;
pub mod claims;
pub mod codec;

pub use authority::AuthoritySet;
pub use claims::{Claims, RoleClaim, RoleClaims};
pub use codec::{decode, ensure_live, ensure_live_at, is_expired, is_expired_at};
