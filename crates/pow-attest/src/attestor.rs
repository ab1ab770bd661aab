//! The Attestor: proof-of-work search bound to a signing identity.
//!
//! Control flow: generate keys, search for a candidate, sign the candidate,
//! verify the candidate against the signature.

use pow_attest_core::{
    KeyPair, PowResult, Prefix, PublicKey, Seed, Signature, SignatureScheme, VerificationOutcome,
};

use crate::attestation::{Attestation, TamperReport};
use crate::config::AttestorConfig;
use crate::error::Result;

/// Holds a key pair and produces signed proofs of work.
pub struct Attestor {
    /// The identity key pair. The private half only ever signs.
    keypair: KeyPair,
    /// Configuration.
    config: AttestorConfig,
}

impl Attestor {
    /// Create an attestor around an existing key pair.
    pub fn new(keypair: KeyPair, config: AttestorConfig) -> Self {
        Self { keypair, config }
    }

    /// Generate a key pair as described by `config` and wrap it.
    pub fn generate(config: AttestorConfig) -> Result<Self> {
        config.validate()?;
        let keypair = match config.scheme {
            SignatureScheme::Ed25519 => KeyPair::generate(SignatureScheme::Ed25519)?,
            SignatureScheme::RsaSha256 => KeyPair::generate_rsa(config.rsa_bits)?,
        };
        tracing::debug!("Generated {} key pair {:?}", config.scheme, keypair.public_key());
        Ok(Self::new(keypair, config))
    }

    pub fn public_key(&self) -> &PublicKey {
        self.keypair.public_key()
    }

    pub fn config(&self) -> &AttestorConfig {
        &self.config
    }

    /// Run the configured search for `seed` and `prefix`.
    pub fn prove(&self, seed: &Seed, prefix: &Prefix) -> Result<PowResult> {
        let search = self.config.search();
        let result = if self.config.workers.get() > 1 {
            search.search_parallel(seed, prefix, self.config.workers)
        } else {
            search.search(seed, prefix)
        };

        match result {
            Ok(pow) => {
                tracing::info!(
                    "Found {} prefix {:?} for seed {:?}: counter={} digest={} elapsed={:.4}s",
                    pow.algorithm(),
                    prefix.as_str(),
                    seed.as_str(),
                    pow.counter(),
                    pow.digest_hex(),
                    pow.elapsed().as_secs_f64()
                );
                Ok(pow)
            }
            Err(e) => {
                tracing::warn!("Search for prefix {:?} failed: {}", prefix.as_str(), e);
                Err(e.into())
            }
        }
    }

    /// Sign exactly `data`.
    pub fn sign(&self, data: &[u8]) -> Result<Signature> {
        let signature = self.keypair.sign(data)?;
        tracing::debug!("Signed {} bytes with {}", data.len(), signature.scheme());
        Ok(signature)
    }

    /// Check `signature` over `data` against this attestor's public key.
    pub fn verify(&self, data: &[u8], signature: &Signature) -> VerificationOutcome {
        let outcome = self.keypair.public_key().verify(data, signature);
        if !outcome.is_valid() {
            tracing::warn!("Signature verification failed for {} bytes", data.len());
        }
        outcome
    }

    /// Search, then sign the winning candidate.
    ///
    /// `seed` and `prefix` are validated before the search starts.
    pub fn attest(&self, seed: &str, prefix: &str) -> Result<Attestation> {
        let seed = Seed::new(seed)?;
        let prefix = Prefix::new(prefix)?;

        let pow = self.prove(&seed, &prefix)?;
        let signature = self.sign(pow.candidate().as_bytes())?;

        tracing::info!(
            "Attested {:?} with {} key {:?}",
            pow.candidate().as_str(),
            signature.scheme(),
            self.keypair.public_key()
        );

        Ok(Attestation::new(
            seed,
            prefix,
            pow,
            self.keypair.public_key().clone(),
            signature,
        ))
    }

    /// Show that the signature breaks when `suffix` is appended to the
    /// signed candidate.
    pub fn demonstrate_tamper(&self, attestation: &Attestation, suffix: &str) -> TamperReport {
        let report = attestation.tamper_check(suffix);
        if report.tampered.is_valid() {
            tracing::warn!(
                "Tampered payload {:?}+{:?} still verifies",
                attestation.pow().candidate().as_str(),
                suffix
            );
        } else {
            tracing::info!(
                "Tampered payload {:?}+{:?} rejected",
                attestation.pow().candidate().as_str(),
                suffix
            );
        }
        report
    }
}

impl std::fmt::Debug for Attestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attestor")
            .field("keypair", &self.keypair)
            .field("config", &self.config)
            .finish()
    }
}
