//! Error types for pow-attest core.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by the proof-of-work search.
///
/// Input validation errors are returned before the search loop starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("seed must not be empty")]
    EmptySeed,

    #[error("invalid prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("no matching counter within {attempts} attempts")]
    NotFound { attempts: u64 },

    #[error("search timed out after {elapsed:?} ({attempts} attempts)")]
    Timeout { elapsed: Duration, attempts: u64 },
}

impl SearchError {
    pub(crate) fn invalid_prefix(prefix: &str, reason: impl Into<String>) -> Self {
        SearchError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by key generation, signing and key decoding.
///
/// Verification never produces one of these; it yields a
/// [`VerificationOutcome`](crate::crypto::VerificationOutcome) instead.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("RSA modulus of {bits} bits is below the minimum of {min}")]
    KeyTooSmall { bits: usize, min: usize },

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),
}
