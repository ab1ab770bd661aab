//! Attestor configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use pow_attest_core::{
    HashAlgorithm, PowSearch, SearchLimits, SignatureScheme, DEFAULT_RSA_BITS, MIN_RSA_BITS,
};

use crate::error::{AttestError, Result};

/// Configuration for an [`Attestor`](crate::Attestor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestorConfig {
    /// Hash applied to each candidate.
    pub hash: HashAlgorithm,
    /// Signature scheme used when generating keys.
    pub scheme: SignatureScheme,
    /// RSA modulus size when `scheme` is RSA.
    pub rsa_bits: usize,
    /// Search bounds. Unbounded by default.
    pub limits: SearchLimits,
    /// Search threads. One means a plain sequential search.
    pub workers: NonZeroUsize,
}

impl Default for AttestorConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::Sha256,
            scheme: SignatureScheme::Ed25519,
            rsa_bits: DEFAULT_RSA_BITS,
            limits: SearchLimits::UNBOUNDED,
            workers: NonZeroUsize::MIN,
        }
    }
}

impl AttestorConfig {
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn with_scheme(mut self, scheme: SignatureScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Use RSA-SHA256 with a `bits`-bit modulus.
    pub fn with_rsa(mut self, bits: usize) -> Self {
        self.scheme = SignatureScheme::RsaSha256;
        self.rsa_bits = bits;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.limits.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.limits.deadline = Some(deadline);
        self
    }

    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    /// Reject settings that key generation would refuse anyway.
    pub fn validate(&self) -> Result<()> {
        if self.scheme == SignatureScheme::RsaSha256 && self.rsa_bits < MIN_RSA_BITS {
            return Err(AttestError::InvalidConfig(format!(
                "rsa_bits {} is below the minimum of {}",
                self.rsa_bits, MIN_RSA_BITS
            )));
        }
        Ok(())
    }

    /// The search this configuration describes.
    pub fn search(&self) -> PowSearch {
        PowSearch::new(self.hash).with_limits(self.limits)
    }
}
