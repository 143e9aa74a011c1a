//! Capability token verification.
//!
//! This is the security boundary: every input here is attacker-controlled.
//! All failure modes collapse into one opaque [`TokenRejected`] value so
//! that clients cannot distinguish a forged signature from a malformed
//! token or an expired one; the precise cause is logged at debug level and
//! exposed on the rejection for in-process diagnostics only.

use tracing::debug;

use filegate_core::{ResourceScope, SecretKey};

use crate::claims::TokenClaims;
use crate::clock::{Clock, SystemClock};
use crate::compare::constant_time_eq;
use crate::encoding::{b64_decode, b64_encode, decode_field};
use crate::mac::compute_mac;

/// Why a token was rejected. Never surface this to untrusted clients; the
/// HTTP layer maps every variant to the same generic response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Structural failure: wrong segment/field count, bad base64, bad
    /// percent-encoding, or a non-numeric expiry
    Malformed,
    /// MAC did not match the payload
    SignatureMismatch,
    /// Signature valid but the expiry second has passed
    Expired,
}

/// Opaque verification failure.
///
/// Displays identically for every cause; use [`TokenRejected::reason`] for
/// operator-facing diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid or expired token")]
pub struct TokenRejected {
    reason: RejectReason,
}

impl TokenRejected {
    fn new(reason: RejectReason) -> Self {
        Self { reason }
    }

    /// Internal cause, for logging and tests
    #[must_use]
    pub fn reason(&self) -> RejectReason {
        self.reason
    }
}

/// Verifies tokens produced by [`TokenIssuer`](crate::issuer::TokenIssuer).
///
/// Stateless and thread-safe; holds only the shared secret and a clock.
#[derive(Debug, Clone)]
pub struct TokenVerifier<C: Clock = SystemClock> {
    key: SecretKey,
    clock: C,
}

impl TokenVerifier<SystemClock> {
    /// Create a verifier reading the wall clock
    #[must_use]
    pub fn new(key: SecretKey) -> Self {
        Self::with_clock(key, SystemClock)
    }
}

impl<C: Clock> TokenVerifier<C> {
    /// Create a verifier with an explicit clock
    #[must_use]
    pub fn with_clock(key: SecretKey, clock: C) -> Self {
        Self { key, clock }
    }

    /// Verify a presented token and recover its claims.
    ///
    /// The signature is checked before the payload is parsed, and the
    /// comparison runs in constant time over the full signature width. A
    /// token remains valid through the end of its expiry second: rejection
    /// requires `now > expiry`, strictly.
    ///
    /// Never panics on malformed input; every decode and parse failure is
    /// converted into a rejection.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenRejected> {
        // Split payload from signature on the first separator only; the
        // base64url alphabet cannot contain '.', so anything after the
        // first one belongs to the signature segment.
        let Some((payload_b64, sig_b64)) = token.split_once('.') else {
            return Err(self.reject(RejectReason::Malformed, "missing segment separator"));
        };

        let payload_bytes = match b64_decode(payload_b64) {
            Ok(bytes) => bytes,
            Err(_) => return Err(self.reject(RejectReason::Malformed, "payload is not base64url")),
        };
        let payload = match std::str::from_utf8(&payload_bytes) {
            Ok(payload) => payload,
            Err(_) => return Err(self.reject(RejectReason::Malformed, "payload is not UTF-8")),
        };

        // Authenticate before parsing: nothing below runs on a payload the
        // MAC does not vouch for.
        let expected_sig = b64_encode(&compute_mac(&self.key, payload));
        if !constant_time_eq(&expected_sig, sig_b64) {
            return Err(self.reject(RejectReason::SignatureMismatch, "signature mismatch"));
        }

        let claims = match parse_payload(payload) {
            Some(claims) => claims,
            None => return Err(self.reject(RejectReason::Malformed, "bad payload fields")),
        };

        if self.clock.now_epoch_secs() > claims.expiry {
            return Err(self.reject(RejectReason::Expired, "token expired"));
        }

        Ok(claims)
    }

    fn reject(&self, reason: RejectReason, cause: &str) -> TokenRejected {
        debug!(?reason, cause, "rejected file access token");
        TokenRejected::new(reason)
    }
}

/// Parse an authenticated payload into claims. `None` on any structural
/// problem: field count, percent-decoding, empty values, or expiry parse.
fn parse_payload(payload: &str) -> Option<TokenClaims> {
    let fields: Vec<&str> = payload.split('|').collect();
    if fields.len() != 3 {
        return None;
    }
    let bucket = decode_field(fields[0])?;
    let path = decode_field(fields[1])?;
    let expiry: u64 = fields[2].parse().ok()?;
    let scope = ResourceScope::new(bucket, path).ok()?;
    Some(TokenClaims { scope, expiry })
}
