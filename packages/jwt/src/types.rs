//! Header, algorithm and parsed token types

use crate::claims::Claims;
use crate::error::JwtError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value of the `typ` header for tokens issued by this crate
pub const TOKEN_TYPE_JWT: &str = "JWT";

/// Supported HMAC signature algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// HMAC using SHA-256
    #[serde(rename = "HS256")]
    Hs256,
    /// HMAC using SHA-512
    #[serde(rename = "HS512")]
    Hs512,
}

impl SignatureAlgorithm {
    /// Header `alg` value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SignatureAlgorithm::Hs256 => "HS256",
            SignatureAlgorithm::Hs512 => "HS512",
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(SignatureAlgorithm::Hs256),
            "HS512" => Ok(SignatureAlgorithm::Hs512),
            other => Err(JwtError::InvalidAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token header
///
/// Field order is the wire order; changing it changes every signature.
/// Unrecognised members are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Token type, normally [`TOKEN_TYPE_JWT`]. Empty means unset.
    #[serde(rename = "typ", default)]
    pub token_type: String,
    /// Signature algorithm
    #[serde(rename = "alg", default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<SignatureAlgorithm>,
    /// Content type
    #[serde(rename = "cty", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Key identifier hint
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    /// Critical extensions
    #[serde(rename = "crit", default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<String>,
}

impl Header {
    /// Create a `JWT` header for the given algorithm
    #[must_use]
    pub fn new(algorithm: SignatureAlgorithm) -> Self {
        Self {
            token_type: TOKEN_TYPE_JWT.to_string(),
            algorithm: Some(algorithm),
            ..Self::default()
        }
    }

    /// Set the token type
    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Set the content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the key id
    #[must_use]
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Set the critical extensions
    #[must_use]
    pub fn with_critical(mut self, critical: impl Into<String>) -> Self {
        self.critical = Some(critical.into());
        self
    }

    /// Field-by-field merge where a non-empty value in `overrides` wins
    #[must_use]
    pub(crate) fn merged_with(&self, overrides: &Header) -> Header {
        Header {
            token_type: if overrides.token_type.is_empty() {
                self.token_type.clone()
            } else {
                overrides.token_type.clone()
            },
            algorithm: overrides.algorithm.or(self.algorithm),
            content_type: pick(&overrides.content_type, &self.content_type),
            key_id: pick(&overrides.key_id, &self.key_id),
            critical: pick(&overrides.critical, &self.critical),
        }
    }
}

/// A decoded token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Decoded header
    pub header: Header,
    /// Decoded claims
    pub claims: Claims,
    /// Signature segment exactly as supplied
    pub signature: String,
}

/// Non-empty `preferred` wins, otherwise `fallback`
pub(crate) fn pick(preferred: &Option<String>, fallback: &Option<String>) -> Option<String> {
    match preferred {
        Some(value) if !value.is_empty() => Some(value.clone()),
        _ => fallback.clone(),
    }
}
