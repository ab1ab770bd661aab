//! # pow-attest core
//!
//! Pure primitives for pow-attest: proof-of-work search and signatures.
//!
//! This crate contains no I/O and no logging. It is pure computation over
//! hashes and keys.
//!
//! ## Key Types
//!
//! - [`PowSearch`] - Finds the smallest counter whose candidate hash has a prefix
//! - [`PowResult`] - Counter, candidate, digest and elapsed time of a match
//! - [`Prefix`] - Validated lowercase hex difficulty target
//! - [`KeyPair`] - Ed25519 or RSA-SHA256 signing keys
//! - [`VerificationOutcome`] - Valid / Invalid, never an error
//!
//! ## Candidates
//!
//! The candidate for counter `n` is the seed followed by the decimal form of
//! `n`, hashed and signed as UTF-8. See [`types::Candidate`].
//!
//! ```rust
//! use pow_attest_core::search;
//!
//! let result = search("Patrick", "00").unwrap();
//! assert_eq!(result.candidate().as_str(), "Patrick562");
//! assert!(result.digest_hex().starts_with("00"));
//! ```

pub mod crypto;
pub mod digest;
pub mod error;
pub mod prefix;
pub mod search;
pub mod types;

pub use crypto::{
    generate_keys, sign, verify, KeyPair, PrivateKey, PublicKey, Signature, SignatureScheme,
    VerificationOutcome, DEFAULT_RSA_BITS, MIN_RSA_BITS,
};
pub use digest::{Digest, HashAlgorithm, DIGEST_HEX_LEN, DIGEST_LEN};
pub use error::{CryptoError, SearchError};
pub use prefix::Prefix;
pub use search::{search, verify_pow, PowResult, PowSearch, SearchLimits};
pub use types::{Candidate, Seed};
