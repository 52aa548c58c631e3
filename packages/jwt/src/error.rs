//! Token error types and stable reason codes

use crate::validation::{ClaimField, HeaderField};
use thiserror::Error;

/// Token operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Every way creating, parsing or configuring a token can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Token does not split into exactly three segments
    #[error("token is malformed: expected 3 segments, found {segments}")]
    Malformed {
        /// Number of dot-separated segments found
        segments: usize,
    },

    /// Header segment does not decode into a header
    #[error("token header is malformed: {0}")]
    HeadersMalformed(String),

    /// Claims segment does not decode into claims
    #[error("token claims are malformed: {0}")]
    ClaimsMalformed(String),

    /// Expected signature could not be re-derived from the decoded token
    #[error("token could not be verified: {0}")]
    Unverifiable(String),

    /// Recomputed signature differs from the supplied one
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// A header field required by the parse options is absent
    #[error("required header '{0}' is missing")]
    HeaderFieldMissing(HeaderField),

    /// A claim required by the parse options is absent
    #[error("required claim '{0}' is missing")]
    ClaimFieldMissing(ClaimField),

    /// Current time is past the expiration time
    #[error("token expired at {expired_at}, current time is {now}")]
    Expired {
        /// Expiration time of the token (unix seconds)
        expired_at: i64,
        /// Time of the check (unix seconds)
        now: i64,
    },

    /// Current time is before the not-before time
    #[error("token not valid before {not_before}, current time is {now}")]
    NotValidYet {
        /// Not-before time of the token (unix seconds)
        not_before: i64,
        /// Time of the check (unix seconds)
        now: i64,
    },

    /// Token claims to be issued in the future
    #[error("token issued at {issued_at}, which is after current time {now}")]
    IssuedAtInvalid {
        /// Issued-at time of the token (unix seconds)
        issued_at: i64,
        /// Time of the check (unix seconds)
        now: i64,
    },

    /// Unsupported or empty signature algorithm identifier
    #[error("invalid signature algorithm: '{0}'")]
    InvalidAlgorithm(String),

    /// Header type is empty after merging with defaults
    #[error("header 'typ' must be present")]
    MissingHeaderType,

    /// Signature algorithm is empty after merging with defaults
    #[error("header 'alg' must be present")]
    MissingSignatureAlgorithm,

    /// Neither an expiration time nor a token lifetime is available
    #[error("claim 'exp' or a configured token lifetime must be present")]
    MissingExpiration,

    /// Not-before precedes issued-at
    #[error("claim 'nbf' ({not_before}) cannot precede claim 'iat' ({issued_at})")]
    InvalidNotBefore {
        /// Requested not-before time
        not_before: i64,
        /// Effective issued-at time
        issued_at: i64,
    },

    /// Engine constructed without a secret key
    #[error("a non-empty secret key is required")]
    MissingSecretKey,

    /// Header or claims could not be serialized
    #[error("failed to encode token segment: {0}")]
    Encoding(String),

    /// Configuration could not be loaded or resolved
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl JwtError {
    /// Stable, machine-readable reason for this error
    #[must_use]
    pub fn reason(&self) -> ErrorReason {
        match self {
            JwtError::Malformed { .. } => ErrorReason::Malformed,
            JwtError::HeadersMalformed(_) => ErrorReason::HeadersMalformed,
            JwtError::ClaimsMalformed(_) => ErrorReason::ClaimsMalformed,
            JwtError::Unverifiable(_) => ErrorReason::Unverifiable,
            JwtError::SignatureInvalid => ErrorReason::SignatureInvalid,
            JwtError::HeaderFieldMissing(field) => ErrorReason::HeaderFieldMissing(*field),
            JwtError::ClaimFieldMissing(field) => ErrorReason::ClaimFieldMissing(*field),
            JwtError::Expired { .. } => ErrorReason::Expired,
            JwtError::NotValidYet { .. } => ErrorReason::NotValidYet,
            JwtError::IssuedAtInvalid { .. } => ErrorReason::IssuedAtInvalid,
            JwtError::InvalidAlgorithm(_) => ErrorReason::InvalidAlgorithm,
            JwtError::MissingHeaderType => ErrorReason::MissingHeaderType,
            JwtError::MissingSignatureAlgorithm => ErrorReason::MissingSignatureAlgorithm,
            JwtError::MissingExpiration => ErrorReason::MissingExpiration,
            JwtError::InvalidNotBefore { .. } => ErrorReason::InvalidNotBefore,
            JwtError::MissingSecretKey => ErrorReason::MissingSecretKey,
            JwtError::Encoding(_) => ErrorReason::Encoding,
            JwtError::Config(_) => ErrorReason::Config,
        }
    }

    /// Shorthand for `self.reason().code()`
    #[inline]
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.reason().code()
    }

    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn config(msg: &str) -> Self {
        JwtError::Config(msg.to_string())
    }

    /// Create an encoding error
    #[inline]
    #[must_use]
    pub fn encoding(msg: &str) -> Self {
        JwtError::Encoding(msg.to_string())
    }
}

/// Reason code attached to every [`JwtError`]
///
/// Lets callers branch on "expired" versus "forged" versus "malformed"
/// without inspecting error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    /// See [`JwtError::Malformed`]
    Malformed,
    /// See [`JwtError::HeadersMalformed`]
    HeadersMalformed,
    /// See [`JwtError::ClaimsMalformed`]
    ClaimsMalformed,
    /// See [`JwtError::Unverifiable`]
    Unverifiable,
    /// See [`JwtError::SignatureInvalid`]
    SignatureInvalid,
    /// See [`JwtError::HeaderFieldMissing`]
    HeaderFieldMissing(HeaderField),
    /// See [`JwtError::ClaimFieldMissing`]
    ClaimFieldMissing(ClaimField),
    /// See [`JwtError::Expired`]
    Expired,
    /// See [`JwtError::NotValidYet`]
    NotValidYet,
    /// See [`JwtError::IssuedAtInvalid`]
    IssuedAtInvalid,
    /// See [`JwtError::InvalidAlgorithm`]
    InvalidAlgorithm,
    /// See [`JwtError::MissingHeaderType`]
    MissingHeaderType,
    /// See [`JwtError::MissingSignatureAlgorithm`]
    MissingSignatureAlgorithm,
    /// See [`JwtError::MissingExpiration`]
    MissingExpiration,
    /// See [`JwtError::InvalidNotBefore`]
    InvalidNotBefore,
    /// See [`JwtError::MissingSecretKey`]
    MissingSecretKey,
    /// See [`JwtError::Encoding`]
    Encoding,
    /// See [`JwtError::Config`]
    Config,
}

impl ErrorReason {
    /// Stable snake_case code suitable for metrics labels
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            ErrorReason::Malformed => "malformed",
            ErrorReason::HeadersMalformed => "headers_malformed",
            ErrorReason::ClaimsMalformed => "claims_malformed",
            ErrorReason::Unverifiable => "unverifiable",
            ErrorReason::SignatureInvalid => "signature_invalid",
            ErrorReason::HeaderFieldMissing(HeaderField::ContentType) => "header_cty_missing",
            ErrorReason::HeaderFieldMissing(HeaderField::KeyId) => "header_kid_missing",
            ErrorReason::HeaderFieldMissing(HeaderField::Critical) => "header_crit_missing",
            ErrorReason::ClaimFieldMissing(ClaimField::Issuer) => "claim_iss_missing",
            ErrorReason::ClaimFieldMissing(ClaimField::Subject) => "claim_sub_missing",
            ErrorReason::ClaimFieldMissing(ClaimField::Audience) => "claim_aud_missing",
            ErrorReason::ClaimFieldMissing(ClaimField::TokenId) => "claim_jti_missing",
            ErrorReason::ClaimFieldMissing(ClaimField::Data) => "claim_data_missing",
            ErrorReason::Expired => "token_expired",
            ErrorReason::NotValidYet => "token_not_valid_yet",
            ErrorReason::IssuedAtInvalid => "issued_at_invalid",
            ErrorReason::InvalidAlgorithm => "invalid_algorithm",
            ErrorReason::MissingHeaderType => "missing_header_type",
            ErrorReason::MissingSignatureAlgorithm => "missing_signature_algorithm",
            ErrorReason::MissingExpiration => "missing_expiration",
            ErrorReason::InvalidNotBefore => "invalid_not_before",
            ErrorReason::MissingSecretKey => "missing_secret_key",
            ErrorReason::Encoding => "encoding_failed",
            ErrorReason::Config => "invalid_config",
        }
    }

    /// Lifecycle stage a token was in when this reason rejected it
    #[must_use]
    pub const fn stage(self) -> Stage {
        match self {
            ErrorReason::Malformed
            | ErrorReason::HeadersMalformed
            | ErrorReason::ClaimsMalformed => Stage::InTransit,
            ErrorReason::Unverifiable | ErrorReason::SignatureInvalid => Stage::Decoded,
            ErrorReason::HeaderFieldMissing(_) | ErrorReason::ClaimFieldMissing(_) => {
                Stage::SignatureChecked
            }
            ErrorReason::Expired | ErrorReason::NotValidYet | ErrorReason::IssuedAtInvalid => {
                Stage::FieldsChecked
            }
            ErrorReason::InvalidAlgorithm
            | ErrorReason::MissingHeaderType
            | ErrorReason::MissingSignatureAlgorithm
            | ErrorReason::MissingExpiration
            | ErrorReason::InvalidNotBefore
            | ErrorReason::MissingSecretKey
            | ErrorReason::Encoding
            | ErrorReason::Config => Stage::Built,
        }
    }
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Token lifecycle states
///
/// `Built -> Signed -> InTransit -> Decoded -> SignatureChecked ->
/// FieldsChecked -> TemporallyChecked -> Accepted`. A failure at any stage
/// ends the lifecycle as rejected; [`ErrorReason::stage`] reports the last
/// stage the token reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Header and claims assembled by the caller
    Built,
    /// Segments encoded and signed
    Signed,
    /// Opaque token string
    InTransit,
    /// Header and claims decoded
    Decoded,
    /// Signature re-derived and matched
    SignatureChecked,
    /// Required fields present
    FieldsChecked,
    /// Validity window checked
    TemporallyChecked,
    /// Every check passed
    Accepted,
}

impl Stage {
    /// snake_case name used in log events
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Built => "built",
            Stage::Signed => "signed",
            Stage::InTransit => "in_transit",
            Stage::Decoded => "decoded",
            Stage::SignatureChecked => "signature_checked",
            Stage::FieldsChecked => "fields_checked",
            Stage::TemporallyChecked => "temporally_checked",
            Stage::Accepted => "accepted",
        }
    }
}
