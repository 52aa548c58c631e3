//! HMAC-SHA256 / HMAC-SHA512 signing

use crate::error::{JwtError, JwtResult};
use crate::types::SignatureAlgorithm;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the MAC of `message` under `key` with the given algorithm
///
/// # Errors
/// Returns `JwtError::Encoding` if the MAC cannot be keyed.
pub fn sign(message: &[u8], algorithm: SignatureAlgorithm, key: &[u8]) -> JwtResult<Vec<u8>> {
    match algorithm {
        SignatureAlgorithm::Hs256 => {
            let mut mac = HmacSha256::new_from_slice(key)
                .map_err(|_| JwtError::encoding("invalid HMAC key"))?;
            mac.update(message);
            Ok(mac.finalize().into_bytes().to_vec())
        }
        SignatureAlgorithm::Hs512 => {
            let mut mac = HmacSha512::new_from_slice(key)
                .map_err(|_| JwtError::encoding("invalid HMAC key"))?;
            mac.update(message);
            Ok(mac.finalize().into_bytes().to_vec())
        }
    }
}

/// Like [`sign`], selecting the algorithm by its `alg` identifier
///
/// # Errors
/// Returns `JwtError::InvalidAlgorithm` for unsupported or empty identifiers.
pub fn sign_with_identifier(message: &[u8], algorithm: &str, key: &[u8]) -> JwtResult<Vec<u8>> {
    sign(message, algorithm.parse()?, key)
}
