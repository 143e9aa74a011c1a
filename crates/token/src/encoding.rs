//! Wire encoding helpers shared by issuance and verification.
//!
//! Two layers are involved. Bucket and path values are percent-encoded so
//! that the `|` separator can never appear literally inside a payload
//! field, making the three-way split unambiguous. The payload and the MAC
//! are then each base64url-encoded without padding so the assembled token
//! is safe in URLs and query strings.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use filegate_core::{ResourceScope, PAYLOAD_FIELD_SEPARATOR};

/// Everything outside the RFC 3986 unreserved set gets escaped. This keeps
/// `|`, `.`, `%`, and whitespace out of encoded field values.
const FIELD_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encode bytes with the URL-safe base64 alphabet, no padding
#[must_use]
pub fn b64_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a base64url-no-pad segment
pub fn b64_decode(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(segment)
}

/// Percent-encode a payload field value
#[must_use]
pub fn encode_field(value: &str) -> String {
    utf8_percent_encode(value, FIELD_ENCODE_SET).to_string()
}

/// Percent-decode a payload field value; fails on invalid UTF-8
pub fn decode_field(value: &str) -> Option<String> {
    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|cow| cow.into_owned())
}

/// Build the canonical payload string a MAC is computed over
#[must_use]
pub fn encode_payload(scope: &ResourceScope, expiry: u64) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        encode_field(&scope.bucket),
        encode_field(&scope.path),
        expiry,
        sep = PAYLOAD_FIELD_SEPARATOR,
    )
}
