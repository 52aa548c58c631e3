//! Test double for [`TokenEngine`].

use crate::{
    claims::Claims,
    error::{JwtError, JwtResult},
    traits::TokenEngine,
    types::{Header, Token},
    validation::ParseOptions,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Engine that ignores its inputs and returns injected results.
///
/// Unconfigured operations return `JwtError::Unverifiable` / empty defaults.
#[derive(Debug)]
pub struct MockEngine {
    create_result: JwtResult<String>,
    parse_result: JwtResult<Token>,
    header: Header,
    claims: Claims,
    parse_options: ParseOptions,
    create_calls: AtomicUsize,
    parse_calls: AtomicUsize,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Mock with no injected results
    #[must_use]
    pub fn new() -> Self {
        let unset = || JwtError::Unverifiable("mock result not configured".to_string());
        Self {
            create_result: Err(unset()),
            parse_result: Err(unset()),
            header: Header::default(),
            claims: Claims::default(),
            parse_options: ParseOptions::default(),
            create_calls: AtomicUsize::new(0),
            parse_calls: AtomicUsize::new(0),
        }
    }

    /// Result every `create` call returns
    #[must_use]
    pub fn with_create_result(mut self, result: JwtResult<String>) -> Self {
        self.create_result = result;
        self
    }

    /// Result every `parse` call returns
    #[must_use]
    pub fn with_parse_result(mut self, result: JwtResult<Token>) -> Self {
        self.parse_result = result;
        self
    }

    /// Header returned by `default_header`
    #[must_use]
    pub fn with_default_header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    /// Claims returned by `default_claims`
    #[must_use]
    pub fn with_default_claims(mut self, claims: Claims) -> Self {
        self.claims = claims;
        self
    }

    /// Options returned by `default_parse_options`
    #[must_use]
    pub fn with_default_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Number of `create` calls so far
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Relaxed)
    }

    /// Number of `parse` calls so far
    #[must_use]
    pub fn parse_calls(&self) -> usize {
        self.parse_calls.load(Ordering::Relaxed)
    }
}

impl TokenEngine for MockEngine {
    fn create(&self, _claims: &Claims, _header: Option<&Header>) -> JwtResult<String> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        self.create_result.clone()
    }

    fn parse(&self, _token: &str, _options: Option<&ParseOptions>) -> JwtResult<Token> {
        self.parse_calls.fetch_add(1, Ordering::Relaxed);
        self.parse_result.clone()
    }

    fn default_header(&self) -> &Header {
        &self.header
    }

    fn default_claims(&self) -> &Claims {
        &self.claims
    }

    fn default_parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }
}
