//! Signing and verification.
//!
//! Two schemes are supported: Ed25519 and RSASSA-PKCS1-v1_5 over SHA-256.
//! Signing fails loudly; verification never fails, it only reports a
//! [`VerificationOutcome`].

use ed25519_dalek::{Signer as _, SigningKey, Verifier as _, VerifyingKey};
use rsa::pkcs1::{DecodeRsaPublicKey, EncodeRsaPublicKey};
use rsa::pkcs1v15;
use rsa::signature::SignatureEncoding;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

use crate::digest::HashAlgorithm;
use crate::error::CryptoError;

/// Smallest RSA modulus accepted for new keys.
pub const MIN_RSA_BITS: usize = 2048;

/// RSA modulus used when none is given.
pub const DEFAULT_RSA_BITS: usize = 2048;

/// A signature algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureScheme {
    #[default]
    Ed25519,
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    RsaSha256,
}

impl SignatureScheme {
    pub const fn name(&self) -> &'static str {
        match self {
            SignatureScheme::Ed25519 => "ed25519",
            SignatureScheme::RsaSha256 => "rsa-sha256",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of checking a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationOutcome {
    Valid,
    Invalid,
}

impl VerificationOutcome {
    pub const fn is_valid(&self) -> bool {
        matches!(self, VerificationOutcome::Valid)
    }

    /// `Valid` only if both are valid.
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (VerificationOutcome::Valid, VerificationOutcome::Valid) => VerificationOutcome::Valid,
            _ => VerificationOutcome::Invalid,
        }
    }
}

impl From<bool> for VerificationOutcome {
    fn from(valid: bool) -> Self {
        if valid {
            VerificationOutcome::Valid
        } else {
            VerificationOutcome::Invalid
        }
    }
}

impl From<VerificationOutcome> for bool {
    fn from(outcome: VerificationOutcome) -> Self {
        outcome.is_valid()
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerificationOutcome::Valid => "valid",
            VerificationOutcome::Invalid => "invalid",
        })
    }
}

/// A public key. Freely shareable.
#[derive(Clone, PartialEq, Eq)]
pub enum PublicKey {
    Ed25519(VerifyingKey),
    Rsa(RsaPublicKey),
}

impl PublicKey {
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            PublicKey::Ed25519(_) => SignatureScheme::Ed25519,
            PublicKey::Rsa(_) => SignatureScheme::RsaSha256,
        }
    }

    /// Encoded key: raw 32 bytes for Ed25519, PKCS#1 DER for RSA.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        match self {
            PublicKey::Ed25519(key) => Ok(key.to_bytes().to_vec()),
            PublicKey::Rsa(key) => key
                .to_pkcs1_der()
                .map(|doc| doc.as_bytes().to_vec())
                .map_err(|e| CryptoError::InvalidPublicKey(e.to_string())),
        }
    }

    /// Decode a key produced by [`PublicKey::to_bytes`].
    pub fn from_bytes(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self, CryptoError> {
        match scheme {
            SignatureScheme::Ed25519 => {
                let arr: [u8; 32] = bytes.try_into().map_err(|_| {
                    CryptoError::InvalidPublicKey(format!(
                        "expected 32 bytes, got {}",
                        bytes.len()
                    ))
                })?;
                VerifyingKey::from_bytes(&arr)
                    .map(PublicKey::Ed25519)
                    .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
            }
            SignatureScheme::RsaSha256 => RsaPublicKey::from_pkcs1_der(bytes)
                .map(PublicKey::Rsa)
                .map_err(|e| CryptoError::InvalidPublicKey(e.to_string())),
        }
    }

    pub fn to_hex(&self) -> Result<String, CryptoError> {
        self.to_bytes().map(hex::encode)
    }

    pub fn from_hex(scheme: SignatureScheme, s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Self::from_bytes(scheme, &bytes)
    }

    /// SHA-256 of the encoded key, as hex. A short public identity.
    pub fn fingerprint(&self) -> Result<String, CryptoError> {
        let bytes = self.to_bytes()?;
        Ok(HashAlgorithm::Sha256.digest(&bytes).to_hex())
    }

    /// Check `signature` over exactly `data`.
    pub fn verify(&self, data: &[u8], signature: &Signature) -> VerificationOutcome {
        if signature.scheme() != self.scheme() {
            return VerificationOutcome::Invalid;
        }

        let valid = match self {
            PublicKey::Ed25519(key) => ed25519_dalek::Signature::from_slice(signature.as_bytes())
                .map(|sig| key.verify(data, &sig).is_ok())
                .unwrap_or(false),
            PublicKey::Rsa(key) => pkcs1v15::Signature::try_from(signature.as_bytes())
                .map(|sig| {
                    pkcs1v15::VerifyingKey::<Sha256>::new(key.clone())
                        .verify(data, &sig)
                        .is_ok()
                })
                .unwrap_or(false),
        };

        VerificationOutcome::from(valid)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicKey::Ed25519(key) => {
                write!(f, "Ed25519Pub({}...)", &hex::encode(key.to_bytes())[..16])
            }
            PublicKey::Rsa(key) => write!(f, "RsaPub({} bits)", key.size() * 8),
        }
    }
}

/// A private key. Only ever used to sign; key material is never printed.
#[derive(Clone)]
pub struct PrivateKey(PrivateKeyInner);

#[derive(Clone)]
enum PrivateKeyInner {
    Ed25519(SigningKey),
    Rsa(Box<RsaPrivateKey>),
}

impl PrivateKey {
    pub fn scheme(&self) -> SignatureScheme {
        match &self.0 {
            PrivateKeyInner::Ed25519(_) => SignatureScheme::Ed25519,
            PrivateKeyInner::Rsa(_) => SignatureScheme::RsaSha256,
        }
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        match &self.0 {
            PrivateKeyInner::Ed25519(key) => PublicKey::Ed25519(key.verifying_key()),
            PrivateKeyInner::Rsa(key) => PublicKey::Rsa(key.to_public_key()),
        }
    }

    /// Sign exactly `data`, with no normalization.
    pub fn sign(&self, data: &[u8]) -> Result<Signature, CryptoError> {
        let bytes = match &self.0 {
            PrivateKeyInner::Ed25519(key) => key
                .try_sign(data)
                .map_err(|e| CryptoError::Signing(e.to_string()))?
                .to_bytes()
                .to_vec(),
            PrivateKeyInner::Rsa(key) => {
                pkcs1v15::SigningKey::<Sha256>::new(RsaPrivateKey::clone(key))
                    .try_sign(data)
                    .map_err(|e| CryptoError::Signing(e.to_string()))?
                    .to_vec()
            }
        };

        Ok(Signature {
            scheme: self.scheme(),
            bytes,
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({}, <redacted>)", self.scheme())
    }
}

/// A public/private key pair.
#[derive(Clone)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Generate a fresh key pair. RSA keys use [`DEFAULT_RSA_BITS`].
    pub fn generate(scheme: SignatureScheme) -> Result<Self, CryptoError> {
        match scheme {
            SignatureScheme::Ed25519 => {
                let mut rng = rand::thread_rng();
                Ok(Self::from_private(PrivateKey(PrivateKeyInner::Ed25519(
                    SigningKey::generate(&mut rng),
                ))))
            }
            SignatureScheme::RsaSha256 => Self::generate_rsa(DEFAULT_RSA_BITS),
        }
    }

    /// Generate an RSA key pair with a `bits`-bit modulus.
    pub fn generate_rsa(bits: usize) -> Result<Self, CryptoError> {
        if bits < MIN_RSA_BITS {
            return Err(CryptoError::KeyTooSmall {
                bits,
                min: MIN_RSA_BITS,
            });
        }
        let mut rng = rand::thread_rng();
        let key = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        Ok(Self::from_private(PrivateKey(PrivateKeyInner::Rsa(
            Box::new(key),
        ))))
    }

    /// Deterministic Ed25519 key pair from a 32-byte seed.
    pub fn ed25519_from_seed(seed: &[u8; 32]) -> Self {
        Self::from_private(PrivateKey(PrivateKeyInner::Ed25519(
            SigningKey::from_bytes(seed),
        )))
    }

    fn from_private(private: PrivateKey) -> Self {
        Self {
            public: private.public_key(),
            private,
        }
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.private.scheme()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// Sign with the private half.
    pub fn sign(&self, data: &[u8]) -> Result<Signature, CryptoError> {
        self.private.sign(data)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({:?})", self.public)
    }
}

/// An opaque signature tagged with the scheme that produced it.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    scheme: SignatureScheme,
    bytes: Vec<u8>,
}

impl Signature {
    pub fn from_bytes(scheme: SignatureScheme, bytes: Vec<u8>) -> Self {
        Self { scheme, bytes }
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn from_hex(scheme: SignatureScheme, s: &str) -> Result<Self, CryptoError> {
        let bytes =
            hex::decode(s).map_err(|e| CryptoError::InvalidSignatureEncoding(e.to_string()))?;
        Ok(Self { scheme, bytes })
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Signature({}, {}...)", self.scheme, &hex[..hex.len().min(16)])
    }
}

/// Generate a key pair for `scheme`.
pub fn generate_keys(scheme: SignatureScheme) -> Result<KeyPair, CryptoError> {
    KeyPair::generate(scheme)
}

/// Sign exactly `data` with `private_key`.
pub fn sign(private_key: &PrivateKey, data: &[u8]) -> Result<Signature, CryptoError> {
    private_key.sign(data)
}

/// Check a `(data, signature, public key)` triple. Never fails.
pub fn verify(public_key: &PublicKey, data: &[u8], signature: &Signature) -> VerificationOutcome {
    public_key.verify(data, signature)
}
