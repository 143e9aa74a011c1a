//! Keyed MAC shared by issuance and verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use filegate_core::SecretKey;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over the canonical payload bytes
pub(crate) fn compute_mac(key: &SecretKey, payload: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        // HMAC accepts keys of any length
        .expect("HMAC-SHA256 key initialization cannot fail");
    mac.update(payload.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_answer_rfc4231_case_2() {
        // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?"
        let key = SecretKey::from_string("Jefe");
        let mac = compute_mac(&key, "what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn different_keys_produce_different_macs() {
        let payload = "bucket|path|1700000000";
        let a = compute_mac(&SecretKey::from_string("key-a"), payload);
        let b = compute_mac(&SecretKey::from_string("key-b"), payload);
        assert_ne!(a, b);
    }
}
