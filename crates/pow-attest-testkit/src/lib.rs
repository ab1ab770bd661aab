//! # pow-attest testkit
//!
//! Testing utilities for pow-attest.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known searches and Ed25519 signatures with expected outputs
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use pow_attest_testkit::vectors::{all_signature_vectors, sign_vector};
//!
//! for vector in all_signature_vectors() {
//!     let (_, signature) = sign_vector(&vector);
//!     assert_eq!(signature, vector.signature);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use pow_attest_testkit::generators::SearchParams;
//!
//! proptest! {
//!     #[test]
//!     fn search_is_deterministic(params: SearchParams) {
//!         let search = pow_attest_core::PowSearch::new(params.algorithm);
//!         let a = search.search(&params.seed, &params.prefix).unwrap();
//!         let b = search.search(&params.seed, &params.prefix).unwrap();
//!         prop_assert_eq!(a.counter(), b.counter());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use pow_attest_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([7u8; 32]);
//! let attestation = fixture.attest("Patrick", "0");
//! assert!(attestation.verify().is_valid());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, shared_rsa_keypair, TestFixture};
pub use generators::SearchParams;
pub use vectors::{
    all_pow_vectors, all_signature_vectors, minimality_violation, vectors_json,
    verify_all_vectors, PowVector, SignatureVector,
};
