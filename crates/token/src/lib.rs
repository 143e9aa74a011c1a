//! Short-lived HMAC capability tokens for scoped file access.
//!
//! A token grants read access to exactly one `(bucket, path)` pair until an
//! absolute expiry instant. It is self-contained: verification needs only
//! the shared secret, no server-side session state.
//!
//! Wire format: `base64url(payload) "." base64url(mac)` where
//! `payload = urlencode(bucket) "|" urlencode(path) "|" expiry_epoch_secs`
//! and the MAC is HMAC-SHA256 over the payload bytes. Both base64 segments
//! use the URL-safe alphabet without padding, so a token survives query
//! strings untouched.
//!
//! [`TokenIssuer`] and [`TokenVerifier`] share the secret and nothing else;
//! both are cheap to clone and safe to call concurrently.

pub mod claims;
pub mod clock;
pub mod compare;
pub mod encoding;
pub mod issuer;
mod mac;
pub mod verifier;

pub use self::{
    claims::{IssuedToken, TokenClaims},
    clock::{Clock, FixedClock, SystemClock},
    compare::constant_time_eq,
    issuer::TokenIssuer,
    verifier::{RejectReason, TokenRejected, TokenVerifier},
};
