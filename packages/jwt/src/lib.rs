//! Stateless HMAC-signed tokens
//!
//! This crate issues and verifies compact `header.claims.signature` tokens:
//! - HS256 and HS512 signatures over the exact `header.claims` segments
//! - Configured default header, claims and token lifetime
//! - Constant-time signature comparison
//! - Required-field and exp/nbf/iat validation with stable reason codes
//!
//! ```
//! use jwtseal::{Claims, Config, Engine, Header, SignatureAlgorithm};
//!
//! let config = Config::builder("secret")
//!     .header(Header::new(SignatureAlgorithm::Hs256))
//!     .token_lifetime_secs(3600)
//!     .build()?;
//! let engine = Engine::new(config)?;
//!
//! let token = engine.create(&Claims::builder().subject("alice").build(), None)?;
//! let parsed = engine.parse(&token, None)?;
//! assert_eq!(parsed.claims.subject.as_deref(), Some("alice"));
//! # Ok::<(), jwtseal::JwtError>(())
//! ```

pub mod claims;
pub mod codec;
pub mod config;
pub mod crypto;
mod engine;
mod error;
mod mock;
mod traits;
mod types;
pub mod validation;

pub use claims::{Claims, ClaimsBuilder};
pub use config::{Config, ConfigBuilder, SecretKey};
pub use crypto::SignatureEncoding;
pub use engine::{inspect, Engine};
pub use error::*;
pub use mock::MockEngine;
pub use traits::TokenEngine;
pub use types::*;
pub use validation::{ClaimField, HeaderField, ParseOptions, Validator};
