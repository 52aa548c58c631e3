//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of token
//! identifiers. Identifiers that could link a log line to a bearer (subject,
//! token id) are only ever logged as a truncated SHA-256 fingerprint.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging entry points shared by the workspace crates
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above (recommended for production)
    /// - `RUST_LOG=jwtseal=warn` - Only token rejections from the engine
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; repeated initialisation is ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a freshly issued token
    pub fn log_token_issued(algorithm: &str, token_id: Option<&str>, expires_at: i64) {
        let token_hash = token_id.map_or_else(|| "none".to_string(), Self::fingerprint);
        debug!("Token issued: alg={algorithm} jti_hash={token_hash} exp={expires_at}");
    }

    /// Log a token that passed every check
    pub fn log_token_accepted(subject: Option<&str>) {
        let subject_hash = subject.map_or_else(|| "anonymous".to_string(), Self::fingerprint);
        debug!("Token accepted (sub_hash: {subject_hash})");
    }

    /// Log a rejected token by reason code and lifecycle stage
    ///
    /// Never logs the token itself.
    pub fn log_token_rejected(reason_code: &str, stage: &str) {
        warn!("Token rejected: reason={reason_code} stage={stage}");
    }

    /// Cryptographically secure fingerprint for logging
    ///
    /// Returns `#` followed by the first 12 hex characters of the SHA-256 digest.
    #[must_use]
    pub fn fingerprint(value: &str) -> String {
        let hash = Sha256::digest(value.as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}
