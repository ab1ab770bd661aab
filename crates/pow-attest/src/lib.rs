//! # pow-attest
//!
//! Proof-of-work search bound to a public identity by a signature.
//!
//! ## Overview
//!
//! - **Search**: find the smallest counter `n` such that the hash of
//!   `seed ++ n` starts with a hex prefix
//! - **Attest**: sign the winning candidate with a private key
//! - **Verify**: check the candidate, signature and public key; any change
//!   to the candidate makes verification fail
//!
//! ## Usage
//!
//! ```rust
//! use pow_attest::{Attestor, AttestorConfig};
//!
//! let attestor = Attestor::generate(AttestorConfig::default()).unwrap();
//!
//! let attestation = attestor.attest("Patrick", "00").unwrap();
//! assert_eq!(attestation.pow().candidate().as_str(), "Patrick562");
//! assert!(attestation.verify().is_valid());
//!
//! // Appending a single character breaks the signature.
//! let report = attestor.demonstrate_tamper(&attestation, "x");
//! assert!(report.holds());
//! ```
//!
//! ## Search limits
//!
//! The default search is unbounded, like the reference script: an
//! unreachable prefix never returns. Set `max_attempts` or a deadline on
//! [`AttestorConfig`] to get `NotFound` / `Timeout` instead.
//!
//! ## Re-exports
//!
//! `pow_attest::core` is the primitives crate (search, digests, keys).

pub mod attestation;
pub mod attestor;
pub mod config;
pub mod error;

pub use pow_attest_core as core;

pub use attestation::{Attestation, AttestationRecord, TamperReport, DEFAULT_TAMPER_SUFFIX};
pub use attestor::Attestor;
pub use config::AttestorConfig;
pub use error::{AttestError, Result};

pub use pow_attest_core::{
    generate_keys, search, sign, verify, Candidate, Digest, HashAlgorithm, KeyPair, PowResult,
    PowSearch, Prefix, PublicKey, SearchError, SearchLimits, Seed, Signature, SignatureScheme,
    VerificationOutcome,
};
