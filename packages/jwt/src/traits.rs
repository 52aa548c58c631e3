//! Core engine trait.

use crate::{
    claims::Claims,
    error::JwtResult,
    types::{Header, Token},
    validation::ParseOptions,
};

/// Token issuing and verification interface.
///
/// Implemented by [`crate::Engine`] and by [`crate::MockEngine`] so callers
/// can depend on the trait and substitute canned results in tests.
/// Implementations must be thread-safe (Send + Sync).
pub trait TokenEngine: Send + Sync {
    /// Create a signed token from claims and optional header overrides.
    ///
    /// # Errors
    /// Returns the construction error that prevented signing.
    fn create(&self, claims: &Claims, header: Option<&Header>) -> JwtResult<String>;

    /// Parse, verify and validate a token.
    ///
    /// # Errors
    /// Returns the rejection reason.
    fn parse(&self, token: &str, options: Option<&ParseOptions>) -> JwtResult<Token>;

    /// Configured default header.
    fn default_header(&self) -> &Header;

    /// Configured default claims.
    fn default_claims(&self) -> &Claims;

    /// Configured default parse options.
    fn default_parse_options(&self) -> &ParseOptions;
}

/// Implementation of `TokenEngine` for `Arc<T>` to allow shared ownership.
impl<T: TokenEngine + ?Sized> TokenEngine for std::sync::Arc<T> {
    fn create(&self, claims: &Claims, header: Option<&Header>) -> JwtResult<String> {
        (**self).create(claims, header)
    }

    fn parse(&self, token: &str, options: Option<&ParseOptions>) -> JwtResult<Token> {
        (**self).parse(token, options)
    }

    fn default_header(&self) -> &Header {
        (**self).default_header()
    }

    fn default_claims(&self) -> &Claims {
        (**self).default_claims()
    }

    fn default_parse_options(&self) -> &ParseOptions {
        (**self).default_parse_options()
    }
}
