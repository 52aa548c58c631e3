//! Token engine: creation (compose + sign) and parsing (decode + verify + validate).

use crate::{
    claims::Claims,
    codec::{decode_segment, encode_segment},
    config::Config,
    crypto::{self, signatures_match},
    error::{JwtError, JwtResult, Stage},
    traits::TokenEngine,
    types::{Header, SignatureAlgorithm, Token},
    validation::{ParseOptions, Validator},
};
use chrono::Utc;
use jwtseal_common::LoggingTransformer;
use std::sync::Arc;

/// Issues and verifies tokens under one immutable [`Config`].
///
/// Cloning is cheap and clones share the configuration, so an engine can be
/// handed to any number of threads.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Arc<Config>,
}

/// Encoded header and claims segments plus the signature over them.
struct Sealed {
    header_segment: String,
    claims_segment: String,
    signature: String,
}

impl Engine {
    /// Create an engine.
    ///
    /// # Errors
    /// Returns `JwtError::MissingSecretKey` if the configured key is empty.
    pub fn new(config: Config) -> JwtResult<Self> {
        if config.secret_key.is_empty() {
            return Err(JwtError::MissingSecretKey);
        }
        tracing::debug!(
            alg = ?config.default_header.algorithm,
            lifetime_secs = config.token_lifetime_secs,
            encoding = ?config.signature_encoding,
            "token engine initialised"
        );
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// The configuration this engine was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a signed token.
    ///
    /// `header` overrides the configured default header field by field;
    /// `claims` overrides the configured default claims the same way. Neither
    /// argument is modified.
    ///
    /// # Errors
    /// Returns `MissingHeaderType`, `MissingSignatureAlgorithm`,
    /// `InvalidNotBefore`, `MissingExpiration` or `Encoding`.
    pub fn create(&self, claims: &Claims, header: Option<&Header>) -> JwtResult<String> {
        let header = match header {
            Some(overrides) => self.config.default_header.merged_with(overrides),
            None => self.config.default_header.clone(),
        };
        if header.token_type.is_empty() {
            return Err(JwtError::MissingHeaderType);
        }
        let algorithm = header
            .algorithm
            .ok_or(JwtError::MissingSignatureAlgorithm)?;

        let claims = self.apply_temporal_defaults(self.config.default_claims.merged_with(claims))?;

        let sealed = self.seal(&header, &claims, algorithm)?;
        tracing::trace!(stage = Stage::Signed.as_str(), alg = algorithm.as_str(), "token sealed");
        LoggingTransformer::log_token_issued(
            algorithm.as_str(),
            claims.token_id.as_deref(),
            claims.expiration_time,
        );
        Ok(format!(
            "{}.{}.{}",
            sealed.header_segment, sealed.claims_segment, sealed.signature
        ))
    }

    /// Parse, verify and validate a token.
    ///
    /// Uses the configured default parse options when `options` is `None`.
    ///
    /// # Errors
    /// Returns the rejection reason; see [`JwtError::reason`].
    pub fn parse(&self, token: &str, options: Option<&ParseOptions>) -> JwtResult<Token> {
        let options = options.unwrap_or(&self.config.default_parse_options);
        let now = Utc::now().timestamp();

        let result = self.verify(token, options, now);
        match &result {
            Ok(parsed) => {
                LoggingTransformer::log_token_accepted(parsed.claims.subject.as_deref());
                tracing::trace!(stage = Stage::Accepted.as_str(), "token accepted");
            }
            Err(err) => {
                let reason = err.reason();
                LoggingTransformer::log_token_rejected(reason.code(), reason.stage().as_str());
                tracing::debug!(reason = reason.code(), "token rejected: {err}");
            }
        }
        result
    }

    fn verify(&self, token: &str, options: &ParseOptions, now: i64) -> JwtResult<Token> {
        let parsed = inspect(token)?;

        if !options.skip_signature_validation {
            self.check_signature(token, &parsed)?;
        }

        Validator::at_instant(options, now).validate(&parsed)?;
        Ok(parsed)
    }

    /// Re-derive the signature from the decoded header and claims.
    ///
    /// The re-encoded segments must reproduce the supplied ones exactly, so a
    /// token is only accepted in the canonical form this engine produces.
    fn check_signature(&self, token: &str, parsed: &Token) -> JwtResult<()> {
        if parsed.header.token_type.is_empty() {
            return Err(JwtError::Unverifiable(JwtError::MissingHeaderType.to_string()));
        }
        let algorithm = parsed.header.algorithm.ok_or_else(|| {
            JwtError::Unverifiable(JwtError::MissingSignatureAlgorithm.to_string())
        })?;
        let expected = self
            .seal(&parsed.header, &parsed.claims, algorithm)
            .map_err(|e| JwtError::Unverifiable(e.to_string()))?;

        let supplied_unsigned = token
            .rsplit_once('.')
            .map_or("", |(unsigned, _)| unsigned);
        let expected_unsigned = format!("{}.{}", expected.header_segment, expected.claims_segment);

        let canonical = expected_unsigned == supplied_unsigned;
        let signature_ok = signatures_match(&expected.signature, &parsed.signature);
        if canonical && signature_ok {
            Ok(())
        } else {
            Err(JwtError::SignatureInvalid)
        }
    }

    /// Encode both segments and sign `header.claims`.
    fn seal(
        &self,
        header: &Header,
        claims: &Claims,
        algorithm: SignatureAlgorithm,
    ) -> JwtResult<Sealed> {
        let header_segment =
            encode_segment(header).map_err(|e| JwtError::Encoding(e.to_string()))?;
        let claims_segment =
            encode_segment(claims).map_err(|e| JwtError::Encoding(e.to_string()))?;

        let signing_input = format!("{header_segment}.{claims_segment}");
        let mac = crypto::sign(
            signing_input.as_bytes(),
            algorithm,
            self.config.secret_key.expose(),
        )?;

        Ok(Sealed {
            header_segment,
            claims_segment,
            signature: self.config.signature_encoding.encode(&mac),
        })
    }

    /// Default iat to now, check nbf against iat, derive exp from the lifetime.
    fn apply_temporal_defaults(&self, mut claims: Claims) -> JwtResult<Claims> {
        if claims.issued_at == 0 {
            claims.issued_at = Utc::now().timestamp();
        }

        claims.not_before = claims.effective_not_before();
        if let Some(not_before) = claims.not_before {
            if not_before < claims.issued_at {
                return Err(JwtError::InvalidNotBefore {
                    not_before,
                    issued_at: claims.issued_at,
                });
            }
        }

        if claims.expiration_time == 0 {
            if self.config.token_lifetime_secs == 0 {
                return Err(JwtError::MissingExpiration);
            }
            claims.expiration_time = claims
                .issued_at
                .checked_add(self.config.token_lifetime_secs)
                .ok_or_else(|| JwtError::encoding("expiration time overflows"))?;
        }

        Ok(claims)
    }
}

impl TokenEngine for Engine {
    fn create(&self, claims: &Claims, header: Option<&Header>) -> JwtResult<String> {
        Engine::create(self, claims, header)
    }

    fn parse(&self, token: &str, options: Option<&ParseOptions>) -> JwtResult<Token> {
        Engine::parse(self, token, options)
    }

    fn default_header(&self) -> &Header {
        &self.config.default_header
    }

    fn default_claims(&self) -> &Claims {
        &self.config.default_claims
    }

    fn default_parse_options(&self) -> &ParseOptions {
        &self.config.default_parse_options
    }
}

/// Split and decode a token without verifying or validating it.
///
/// Useful to read `kid` or `alg` before deciding how to verify.
///
/// # Errors
/// Returns `Malformed`, `HeadersMalformed` or `ClaimsMalformed`.
pub fn inspect(token: &str) -> JwtResult<Token> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header_segment, claims_segment, signature] = segments[..] else {
        return Err(JwtError::Malformed {
            segments: segments.len(),
        });
    };

    let header: Header = decode_segment(header_segment)
        .map_err(|e| JwtError::HeadersMalformed(e.to_string()))?;
    let claims: Claims = decode_segment(claims_segment)
        .map_err(|e| JwtError::ClaimsMalformed(e.to_string()))?;

    Ok(Token {
        header,
        claims,
        signature: signature.to_string(),
    })
}
