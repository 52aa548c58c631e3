//! Parse options and the presence/temporal validator.

use crate::claims::Claims;
use crate::error::{JwtError, JwtResult};
use crate::types::{Header, Token};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional header fields that parse options can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    /// `cty`
    ContentType,
    /// `kid`
    KeyId,
    /// `crit`
    Critical,
}

impl HeaderField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HeaderField::ContentType => "cty",
            HeaderField::KeyId => "kid",
            HeaderField::Critical => "crit",
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional claims that parse options can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimField {
    /// `iss`
    Issuer,
    /// `sub`
    Subject,
    /// `aud`
    Audience,
    /// `jti`
    TokenId,
    /// `data`
    Data,
}

impl ClaimField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ClaimField::Issuer => "iss",
            ClaimField::Subject => "sub",
            ClaimField::Audience => "aud",
            ClaimField::TokenId => "jti",
            ClaimField::Data => "data",
        }
    }
}

impl fmt::Display for ClaimField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token parse options.
///
/// Every flag is independent and defaults to `false`: no optional field is
/// required, and both signature and temporal checks run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Require the `cty` header.
    pub require_content_type: bool,
    /// Require the `kid` header.
    pub require_key_id: bool,
    /// Require the `crit` header.
    pub require_critical: bool,
    /// Require the `iss` claim.
    pub require_issuer: bool,
    /// Require the `sub` claim.
    pub require_subject: bool,
    /// Require the `aud` claim.
    pub require_audience: bool,
    /// Require the `jti` claim.
    pub require_token_id: bool,
    /// Require the `data` claim.
    pub require_data: bool,
    /// Skip the exp/nbf/iat checks.
    pub skip_claims_validation: bool,
    /// Skip signature re-derivation and comparison.
    pub skip_signature_validation: bool,
}

impl ParseOptions {
    /// Require a header field.
    #[must_use]
    pub fn require_header(mut self, field: HeaderField) -> Self {
        match field {
            HeaderField::ContentType => self.require_content_type = true,
            HeaderField::KeyId => self.require_key_id = true,
            HeaderField::Critical => self.require_critical = true,
        }
        self
    }

    /// Require a claim.
    #[must_use]
    pub fn require_claim(mut self, field: ClaimField) -> Self {
        match field {
            ClaimField::Issuer => self.require_issuer = true,
            ClaimField::Subject => self.require_subject = true,
            ClaimField::Audience => self.require_audience = true,
            ClaimField::TokenId => self.require_token_id = true,
            ClaimField::Data => self.require_data = true,
        }
        self
    }

    /// Set whether to skip the temporal checks.
    #[must_use]
    pub fn skip_claims_validation(mut self, skip: bool) -> Self {
        self.skip_claims_validation = skip;
        self
    }

    /// Set whether to skip signature verification.
    ///
    /// Only for callers that verify authenticity some other way.
    #[must_use]
    pub fn skip_signature_validation(mut self, skip: bool) -> Self {
        self.skip_signature_validation = skip;
        self
    }
}

/// Presence and temporal checks over a decoded token.
///
/// Pure: the only input besides the token and options is the instant the
/// checks run at.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    options: &'a ParseOptions,
    now: i64,
}

impl<'a> Validator<'a> {
    /// Validator checking against the current time.
    #[must_use]
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            now: Utc::now().timestamp(),
        }
    }

    /// Validator checking against a fixed instant (unix seconds).
    #[must_use]
    pub fn at_instant(options: &'a ParseOptions, now: i64) -> Self {
        Self { options, now }
    }

    /// Check against a fixed instant (unix seconds) instead.
    #[must_use]
    pub fn at(mut self, now: i64) -> Self {
        self.now = now;
        self
    }

    /// Run header, claims and temporal checks in that order.
    ///
    /// # Errors
    /// Returns the first failing check as `HeaderFieldMissing`,
    /// `ClaimFieldMissing`, `Expired`, `NotValidYet` or `IssuedAtInvalid`.
    pub fn validate(&self, token: &Token) -> JwtResult<()> {
        self.check_header(&token.header)?;
        self.check_claims(&token.claims)?;
        if !self.options.skip_claims_validation {
            self.check_temporal(&token.claims)?;
        }
        Ok(())
    }

    /// Required header fields.
    ///
    /// # Errors
    /// Returns `HeaderFieldMissing` for the first required field that is
    /// absent or empty.
    pub fn check_header(&self, header: &Header) -> JwtResult<()> {
        let required = [
            (self.options.require_content_type, &header.content_type, HeaderField::ContentType),
            (self.options.require_key_id, &header.key_id, HeaderField::KeyId),
            (self.options.require_critical, &header.critical, HeaderField::Critical),
        ];
        for (flagged, value, field) in required {
            if flagged && is_blank(value) {
                return Err(JwtError::HeaderFieldMissing(field));
            }
        }
        Ok(())
    }

    /// Required claims.
    ///
    /// # Errors
    /// Returns `ClaimFieldMissing` for the first required claim that is
    /// absent or empty.
    pub fn check_claims(&self, claims: &Claims) -> JwtResult<()> {
        let required = [
            (self.options.require_issuer, &claims.issuer, ClaimField::Issuer),
            (self.options.require_subject, &claims.subject, ClaimField::Subject),
            (self.options.require_audience, &claims.audience, ClaimField::Audience),
            (self.options.require_token_id, &claims.token_id, ClaimField::TokenId),
        ];
        for (flagged, value, field) in required {
            if flagged && is_blank(value) {
                return Err(JwtError::ClaimFieldMissing(field));
            }
        }
        if self.options.require_data && claims.data.as_ref().is_none_or(Vec::is_empty) {
            return Err(JwtError::ClaimFieldMissing(ClaimField::Data));
        }
        Ok(())
    }

    /// Validity window: exp, then nbf, then iat.
    ///
    /// # Errors
    /// Returns `Expired`, `NotValidYet` or `IssuedAtInvalid`.
    pub fn check_temporal(&self, claims: &Claims) -> JwtResult<()> {
        let now = self.now;

        if now > claims.expiration_time {
            return Err(JwtError::Expired {
                expired_at: claims.expiration_time,
                now,
            });
        }

        if let Some(not_before) = claims.effective_not_before() {
            if now < not_before {
                return Err(JwtError::NotValidYet { not_before, now });
            }
        }

        // Catches clock skew and forged future timestamps
        if now < claims.issued_at {
            return Err(JwtError::IssuedAtInvalid {
                issued_at: claims.issued_at,
                now,
            });
        }

        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
