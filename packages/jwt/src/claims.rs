//! Token claims and their builder.

use crate::types::pick;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token claims.
///
/// Zero timestamps and `None` fields are "unset" and are filled from the
/// configured defaults when a token is created. Field order is the wire order.
///
/// Unrecognised members are ignored on decode; verification still rejects
/// them because the re-encoded segment no longer matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer.
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Subject.
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Audience.
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    /// Expiry (unix seconds).
    #[serde(rename = "exp", default)]
    pub expiration_time: i64,
    /// Not before (unix seconds).
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i64>,
    /// Issued-at (unix seconds).
    #[serde(rename = "iat", default)]
    pub issued_at: i64,
    /// Token ID.
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    /// Opaque application payload, carried as standard base64.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_data"
    )]
    pub data: Option<Vec<u8>>,
}

impl Claims {
    /// Start building claims.
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::default()
    }

    /// Effective not-before: `Some(0)` counts as unset.
    #[must_use]
    pub fn effective_not_before(&self) -> Option<i64> {
        self.not_before.filter(|&nbf| nbf != 0)
    }

    /// Field-by-field merge where a set value in `overrides` wins.
    #[must_use]
    pub(crate) fn merged_with(&self, overrides: &Claims) -> Claims {
        Claims {
            issuer: pick(&overrides.issuer, &self.issuer),
            subject: pick(&overrides.subject, &self.subject),
            audience: pick(&overrides.audience, &self.audience),
            expiration_time: non_zero_or(overrides.expiration_time, self.expiration_time),
            not_before: overrides
                .effective_not_before()
                .or_else(|| self.effective_not_before()),
            issued_at: non_zero_or(overrides.issued_at, self.issued_at),
            token_id: pick(&overrides.token_id, &self.token_id),
            data: overrides
                .data
                .clone()
                .filter(|data| !data.is_empty())
                .or_else(|| self.data.clone()),
        }
    }
}

fn non_zero_or(preferred: i64, fallback: i64) -> i64 {
    if preferred == 0 { fallback } else { preferred }
}

mod base64_data {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        data: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Fluent builder for [`Claims`].
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: Claims,
}

impl ClaimsBuilder {
    /// Set the issuer (iss) claim.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.claims.issuer = Some(iss.into());
        self
    }

    /// Set the subject (sub) claim.
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.claims.subject = Some(sub.into());
        self
    }

    /// Set the audience (aud) claim.
    #[must_use]
    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.claims.audience = Some(aud.into());
        self
    }

    /// Set the expiration time (unix seconds).
    #[must_use]
    pub fn expires_at(mut self, exp: i64) -> Self {
        self.claims.expiration_time = exp;
        self
    }

    /// Set the expiration time relative to now.
    #[must_use]
    pub fn expires_in(mut self, dur: Duration) -> Self {
        self.claims.expiration_time = Utc::now().timestamp().saturating_add(dur.num_seconds());
        self
    }

    /// Set the not-before (nbf) claim.
    #[must_use]
    pub fn not_before(mut self, nbf: DateTime<Utc>) -> Self {
        self.claims.not_before = Some(nbf.timestamp());
        self
    }

    /// Set the issued-at time (unix seconds).
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.claims.issued_at = iat;
        self
    }

    /// Set the issued-at time to now.
    #[must_use]
    pub fn issued_now(mut self) -> Self {
        self.claims.issued_at = Utc::now().timestamp();
        self
    }

    /// Set the token ID (jti) claim.
    #[must_use]
    pub fn token_id(mut self, jti: impl Into<String>) -> Self {
        self.claims.token_id = Some(jti.into());
        self
    }

    /// Set a random UUID v4 token ID.
    #[must_use]
    pub fn random_token_id(mut self) -> Self {
        self.claims.token_id = Some(uuid::Uuid::new_v4().to_string());
        self
    }

    /// Attach an opaque payload.
    #[must_use]
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.claims.data = Some(data.into());
        self
    }

    /// Build the claims. Unset fields are filled at token creation.
    #[must_use]
    pub fn build(self) -> Claims {
        self.claims
    }
}
