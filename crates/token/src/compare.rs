//! Constant-time equality for signature material.

use subtle::ConstantTimeEq;

/// Compare two strings in constant time with respect to their contents.
///
/// Unequal lengths are rejected up front without examining any bytes; for
/// equal lengths the comparison always walks the full width, so the running
/// time carries no information about where the first mismatch sits.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
