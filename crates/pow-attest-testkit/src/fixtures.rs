//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::OnceLock;

use pow_attest::{Attestation, Attestor, AttestorConfig};
use pow_attest_core::{KeyPair, PublicKey, SignatureScheme};

/// A test fixture with a key pair.
pub struct TestFixture {
    pub keypair: KeyPair,
}

impl TestFixture {
    /// Create a new test fixture with a random Ed25519 key pair.
    pub fn new() -> Self {
        Self {
            keypair: KeyPair::generate(SignatureScheme::Ed25519)
                .expect("ed25519 key generation does not fail"),
        }
    }

    /// Create with a deterministic Ed25519 key pair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: KeyPair::ed25519_from_seed(&seed),
        }
    }

    /// Use the shared RSA key pair.
    pub fn rsa() -> Self {
        Self {
            keypair: shared_rsa_keypair().clone(),
        }
    }

    /// Get the key pair's public key.
    pub fn public_key(&self) -> &PublicKey {
        self.keypair.public_key()
    }

    /// An attestor over this fixture's key pair.
    pub fn attestor(&self, config: AttestorConfig) -> Attestor {
        Attestor::new(self.keypair.clone(), config)
    }

    /// Attest with the default configuration.
    pub fn attest(&self, seed: &str, prefix: &str) -> Attestation {
        self.attestor(AttestorConfig::default())
            .attest(seed, prefix)
            .expect("unbounded attestation succeeds")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A 2048-bit RSA key pair generated once per test binary.
///
/// RSA generation is slow, so tests share this one.
pub fn shared_rsa_keypair() -> &'static KeyPair {
    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(|| {
        KeyPair::generate(SignatureScheme::RsaSha256).expect("rsa key generation succeeds")
    })
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}
