//! Error types for the attestation API.

use pow_attest_core::{CryptoError, SearchError};
use thiserror::Error;

/// Errors that can occur while producing or decoding an attestation.
///
/// Verification is not listed here: it always yields a
/// [`VerificationOutcome`](pow_attest_core::VerificationOutcome).
#[derive(Debug, Error)]
pub enum AttestError {
    /// Proof-of-work search failed or its input was rejected.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Key generation or signing failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// An attestation record could not be decoded.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Invalid configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for AttestError {
    fn from(e: serde_json::Error) -> Self {
        AttestError::MalformedRecord(e.to_string())
    }
}

/// Result type for attestation operations.
pub type Result<T> = std::result::Result<T, AttestError>;
