//! Engine configuration
//!
//! A [`Config`] is an immutable bundle of defaults plus the secret key. It is
//! built once, handed to [`crate::Engine::new`], and never mutated afterwards.

use crate::claims::Claims;
use crate::crypto::SignatureEncoding;
use crate::error::{JwtError, JwtResult};
use crate::types::Header;
use crate::validation::ParseOptions;
use chrono::Duration;
use serde::Deserialize;
use std::fmt;
use zeroize::Zeroizing;

/// HMAC secret, wiped from memory on drop
#[derive(Clone)]
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    /// Wrap raw key material
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }

    /// Read the key from an environment variable
    ///
    /// # Errors
    /// Returns `JwtError::Config` if the variable is unset or not unicode.
    pub fn from_env(var_name: &str) -> JwtResult<Self> {
        let value = Zeroizing::new(std::env::var(var_name).map_err(|e| {
            JwtError::Config(format!("environment variable {var_name}: {e}"))
        })?);
        Ok(Self::new(value.as_bytes()))
    }

    /// Key material
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the key is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl From<&str> for SecretKey {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for SecretKey {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

/// Resolved engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Header merged under every created token's header
    pub default_header: Header,
    /// Claims merged under every created token's claims
    pub default_claims: Claims,
    /// Options used when `parse` is called without options
    pub default_parse_options: ParseOptions,
    /// Lifetime used when a token has no expiration time (0 = none)
    pub token_lifetime_secs: i64,
    /// Signature segment text encoding
    pub signature_encoding: SignatureEncoding,
    /// HMAC secret
    pub secret_key: SecretKey,
}

impl Config {
    /// Start a builder with the given secret key
    pub fn builder(secret_key: impl Into<SecretKey>) -> ConfigBuilder {
        ConfigBuilder {
            config: Config {
                default_header: Header::default(),
                default_claims: Claims::default(),
                default_parse_options: ParseOptions::default(),
                token_lifetime_secs: 0,
                signature_encoding: SignatureEncoding::default(),
                secret_key: secret_key.into(),
            },
        }
    }

    /// Load configuration from a JSON document
    ///
    /// ```json
    /// {
    ///   "header": { "typ": "JWT", "alg": "HS256" },
    ///   "claims": { "iss": "auth.example.com" },
    ///   "parse_options": { "require_subject": true },
    ///   "token_lifetime_secs": 3600,
    ///   "signature_encoding": "base64url",
    ///   "secret_key_env": "JWT_SECRET"
    /// }
    /// ```
    ///
    /// # Errors
    /// Returns `JwtError::Config` for invalid JSON, a missing or doubly
    /// specified secret, or an unset secret environment variable, and
    /// `JwtError::MissingSecretKey` for an empty secret.
    pub fn from_json(json: &str) -> JwtResult<Self> {
        let file: ConfigFile =
            serde_json::from_str(json).map_err(|e| JwtError::Config(e.to_string()))?;
        file.resolve()
    }
}

/// Builder for [`Config`]
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the default header
    #[must_use]
    pub fn header(mut self, header: Header) -> Self {
        self.config.default_header = header;
        self
    }

    /// Set the default claims
    #[must_use]
    pub fn claims(mut self, claims: Claims) -> Self {
        self.config.default_claims = claims;
        self
    }

    /// Set the default parse options
    #[must_use]
    pub fn parse_options(mut self, options: ParseOptions) -> Self {
        self.config.default_parse_options = options;
        self
    }

    /// Set the default token lifetime
    #[must_use]
    pub fn token_lifetime(mut self, lifetime: Duration) -> Self {
        self.config.token_lifetime_secs = lifetime.num_seconds();
        self
    }

    /// Set the default token lifetime in seconds
    #[must_use]
    pub fn token_lifetime_secs(mut self, secs: i64) -> Self {
        self.config.token_lifetime_secs = secs;
        self
    }

    /// Set the signature encoding
    #[must_use]
    pub fn signature_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.config.signature_encoding = encoding;
        self
    }

    /// Finish the configuration
    ///
    /// # Errors
    /// Returns `JwtError::MissingSecretKey` if the secret key is empty.
    pub fn build(self) -> JwtResult<Config> {
        if self.config.secret_key.is_empty() {
            return Err(JwtError::MissingSecretKey);
        }
        Ok(self.config)
    }
}

/// On-disk shape of a configuration document
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    header: Header,
    claims: Claims,
    parse_options: ParseOptions,
    token_lifetime_secs: i64,
    signature_encoding: SignatureEncoding,
    secret_key: Option<String>,
    secret_key_env: Option<String>,
}

impl ConfigFile {
    fn resolve(self) -> JwtResult<Config> {
        let secret = match (self.secret_key, self.secret_key_env) {
            (Some(inline), None) => SecretKey::from(inline),
            (None, Some(var)) => SecretKey::from_env(&var)?,
            (Some(_), Some(_)) => {
                return Err(JwtError::config(
                    "only one of secret_key and secret_key_env may be set",
                ));
            }
            (None, None) => {
                return Err(JwtError::config(
                    "one of secret_key or secret_key_env is required",
                ));
            }
        };

        Config::builder(secret)
            .header(self.header)
            .claims(self.claims)
            .parse_options(self.parse_options)
            .token_lifetime_secs(self.token_lifetime_secs)
            .signature_encoding(self.signature_encoding)
            .build()
    }
}
