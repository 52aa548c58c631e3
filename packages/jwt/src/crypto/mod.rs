//! Signature computation and signature text encoding

pub mod hmac_sha;

pub use hmac_sha::{sign, sign_with_identifier};

use crate::codec::base64_url_encode;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Text encoding of the signature segment
///
/// Fixed per deployment: tokens signed with one encoding never verify under
/// the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureEncoding {
    /// Padding-free URL-safe base64
    #[default]
    Base64Url,
    /// Lowercase hexadecimal
    Hex,
}

impl SignatureEncoding {
    /// Render raw MAC bytes as signature segment text
    #[must_use]
    pub fn encode(self, mac: &[u8]) -> String {
        match self {
            SignatureEncoding::Base64Url => base64_url_encode(mac),
            SignatureEncoding::Hex => hex::encode(mac),
        }
    }
}

/// Constant-time comparison of two signature segments
#[inline]
pub(crate) fn signatures_match(expected: &str, supplied: &str) -> bool {
    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_encodings() {
        let mac = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(SignatureEncoding::Hex.encode(&mac), "deadbeef");
        assert_eq!(SignatureEncoding::Base64Url.encode(&mac), "3q2-7w");
    }

    #[test]
    fn test_signatures_match() {
        assert!(signatures_match("abc", "abc"));
        assert!(!signatures_match("abc", "abd"));
        assert!(!signatures_match("abc", "abcd"));
        assert!(!signatures_match("", "a"));
    }
}
