use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::INSECURE_DEFAULT_SECRET;
use crate::errors::{Error, Result};

/// The (bucket, path) pair a capability token is bound to.
///
/// A token is valid for exactly one scope; callers must compare the scope
/// recovered from a verified token against the scope actually being
/// requested before serving any bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceScope {
    /// Storage namespace identifier
    pub bucket: String,
    /// Object path within the bucket
    pub path: String,
}

impl ResourceScope {
    /// Create a scope, rejecting empty bucket or path values
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        let path = path.into();
        if bucket.is_empty() {
            return Err(Error::invalid_input("bucket", "must not be empty"));
        }
        if path.is_empty() {
            return Err(Error::invalid_input("path", "must not be empty"));
        }
        Ok(Self { bucket, path })
    }

    /// Whether this scope refers to the given coordinates
    #[must_use]
    pub fn matches(&self, bucket: &str, path: &str) -> bool {
        self.bucket == bucket && self.path == path
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.path)
    }
}

/// Shared secret used to key the token MAC.
///
/// The raw bytes are zeroized on drop and never appear in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Build a key from a configuration string
    #[must_use]
    pub fn from_string(secret: impl Into<String>) -> Self {
        Self(secret.into().into_bytes())
    }

    /// Raw key bytes for MAC initialization
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether this key is still the shipped development default
    #[must_use]
    pub fn is_insecure_default(&self) -> bool {
        self.0 == INSECURE_DEFAULT_SECRET.as_bytes()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}
