//! Decoded token contents.

use serde::Serialize;

use filegate_core::ResourceScope;

/// The claims recovered from a successfully verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Resource the token was issued for
    pub scope: ResourceScope,
    /// Last epoch second at which the token is still valid
    pub expiry: u64,
}

impl TokenClaims {
    /// Whether these claims cover the given request coordinates.
    ///
    /// Verification alone proves the token is ours and unexpired for *some*
    /// resource; callers must apply this check against the resource actually
    /// being requested before transferring any bytes.
    #[must_use]
    pub fn matches(&self, bucket: &str, path: &str) -> bool {
        self.scope.matches(bucket, path)
    }
}

/// A freshly issued token together with its expiry instant
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// The compact token string handed to the client
    pub token: String,
    /// Epoch second after which the token stops verifying
    #[serde(rename = "expiresAt")]
    pub expires_at: u64,
}
