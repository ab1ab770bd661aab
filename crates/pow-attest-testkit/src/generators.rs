//! Proptest generators for property-based testing.

use proptest::prelude::*;

use pow_attest_core::{HashAlgorithm, KeyPair, Prefix, Seed};

/// Generate a random Ed25519 key pair.
pub fn keypair() -> impl Strategy<Value = KeyPair> {
    any::<[u8; 32]>().prop_map(|seed| KeyPair::ed25519_from_seed(&seed))
}

/// Generate a non-empty seed, including non-ASCII text.
pub fn seed() -> impl Strategy<Value = Seed> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9_-]{0,15}",
        "\\PC{1,8}",
    ]
    .prop_map(|s| Seed::new(s).expect("strategy never yields empty text"))
}

/// Generate a lowercase hex prefix of at most `max_len` digits.
///
/// Keep `max_len` small: expected search cost is `16^len`.
pub fn prefix(max_len: usize) -> impl Strategy<Value = Prefix> {
    prop::collection::vec(0u8..16, 0..=max_len).prop_map(|digits| {
        let text: String = digits
            .into_iter()
            .map(|d| char::from_digit(d as u32, 16).unwrap_or('0'))
            .collect();
        Prefix::new(&text).expect("strategy yields lowercase hex")
    })
}

/// Generate a hash algorithm.
pub fn hash_algorithm() -> impl Strategy<Value = HashAlgorithm> {
    prop_oneof![Just(HashAlgorithm::Sha256), Just(HashAlgorithm::Blake3)]
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a non-empty suffix to append when tampering.
pub fn suffix() -> impl Strategy<Value = String> {
    "\\PC{1,4}".prop_map(String::from)
}

/// Parameters for a small search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub seed: Seed,
    pub prefix: Prefix,
    pub algorithm: HashAlgorithm,
}

impl Arbitrary for SearchParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (seed(), prefix(2), hash_algorithm())
            .prop_map(|(seed, prefix, algorithm)| SearchParams {
                seed,
                prefix,
                algorithm,
            })
            .boxed()
    }
}
