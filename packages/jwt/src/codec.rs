//! Segment codec: JSON followed by base64url without padding (RFC 7515)

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Why a segment could not be encoded or decoded
#[derive(Debug, Error)]
pub enum CodecError {
    /// Segment is not valid padding-free base64url
    #[error("invalid base64url encoding: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Segment content does not match the target shape
    #[error("invalid JSON content: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a value into a token segment
///
/// Output is byte-identical for structurally identical input: serde emits
/// struct fields in declaration order.
///
/// # Errors
/// Returns `CodecError::Json` if the value cannot be serialized.
pub fn encode_segment<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_vec(value)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a token segment into the target shape
///
/// # Errors
/// Returns `CodecError::Base64` for invalid or non-canonical base64url and
/// `CodecError::Json` when the content does not parse into `T`.
pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, CodecError> {
    let bytes = URL_SAFE_NO_PAD.decode(segment)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}
