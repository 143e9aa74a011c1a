//! Capability token issuance.

use tracing::trace;

use filegate_core::{ResourceScope, SecretKey, TOKEN_SEGMENT_SEPARATOR};

use crate::claims::IssuedToken;
use crate::clock::{Clock, SystemClock};
use crate::encoding::{b64_encode, encode_payload};
use crate::mac::compute_mac;

/// Issues self-contained, signed, expiring access tokens.
///
/// Issuance is a pure function of the scope, the TTL, the shared secret,
/// and the clock; nothing is stored and there is no revocation. Safe to
/// share across threads.
#[derive(Debug, Clone)]
pub struct TokenIssuer<C: Clock = SystemClock> {
    key: SecretKey,
    clock: C,
}

impl TokenIssuer<SystemClock> {
    /// Create an issuer reading the wall clock
    #[must_use]
    pub fn new(key: SecretKey) -> Self {
        Self::with_clock(key, SystemClock)
    }
}

impl<C: Clock> TokenIssuer<C> {
    /// Create an issuer with an explicit clock (tests pin time this way)
    #[must_use]
    pub fn with_clock(key: SecretKey, clock: C) -> Self {
        Self { key, clock }
    }

    /// Issue a token granting access to `scope` for `ttl_seconds` from now.
    ///
    /// A TTL of zero yields a token valid only within the current second.
    /// The expiry addition saturates, so absurd TTLs cannot wrap around to
    /// an already-expired instant.
    #[must_use]
    pub fn issue(&self, scope: &ResourceScope, ttl_seconds: u64) -> IssuedToken {
        let expires_at = self.clock.now_epoch_secs().saturating_add(ttl_seconds);
        let payload = encode_payload(scope, expires_at);
        let mac = compute_mac(&self.key, &payload);
        let token = format!(
            "{}{}{}",
            b64_encode(payload.as_bytes()),
            TOKEN_SEGMENT_SEPARATOR,
            b64_encode(&mac)
        );
        trace!(%scope, expires_at, "issued file access token");
        IssuedToken { token, expires_at }
    }
}
