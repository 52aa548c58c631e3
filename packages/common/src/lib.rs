//! Common infrastructure for the jwtseal workspace
//!
//! Provides the `env_logger` based logging setup and the privacy-preserving
//! log helpers used by the token engine.

pub mod logging;

pub use logging::LoggingTransformer;
