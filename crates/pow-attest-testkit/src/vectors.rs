//! Golden test vectors for deterministic verification.
//!
//! Proof-of-work vectors pin the smallest counter for a seed and prefix
//! under SHA-256. Signature vectors pin deterministic Ed25519 output for a
//! fixed key seed, so any conforming implementation reproduces them.

use serde::Serialize;

use pow_attest_core::{
    verify_pow, Candidate, HashAlgorithm, KeyPair, PowSearch, Prefix, Seed, Signature,
    SignatureScheme,
};

/// A golden proof-of-work vector.
#[derive(Debug, Clone, Serialize)]
pub struct PowVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub seed: &'static str,
    pub prefix: &'static str,
    /// Expected smallest counter.
    pub counter: u64,
    /// Expected hex digest of `seed ++ counter`.
    pub digest: &'static str,
}

/// A golden Ed25519 signature vector.
#[derive(Debug, Clone, Serialize)]
pub struct SignatureVector {
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub key_seed: [u8; 32],
    pub message: &'static str,
    /// Expected public key (hex).
    pub public_key: &'static str,
    /// Expected signature (hex).
    pub signature: &'static str,
}

/// Get all proof-of-work vectors (SHA-256).
pub fn all_pow_vectors() -> Vec<PowVector> {
    vec![
        PowVector {
            name: "empty prefix matches counter zero",
            seed: "Patrick",
            prefix: "",
            counter: 0,
            digest: "83aaa686f3b9fa80b8507416f8ea20f29b74d0b0d6b9e6505ab60965c5d4c3e7",
        },
        PowVector {
            name: "one zero",
            seed: "Patrick",
            prefix: "0",
            counter: 5,
            digest: "0e3faa88a62f1988d8ee81f42d3f6ca3614ead4f0f31387195a884e142378caf",
        },
        PowVector {
            name: "two zeros",
            seed: "Patrick",
            prefix: "00",
            counter: 562,
            digest: "00d9eb3b72d43b5faada48144881af30b941fbd75ee0b40d22a6546ee9c74988",
        },
        PowVector {
            name: "three zeros",
            seed: "Patrick",
            prefix: "000",
            counter: 978,
            digest: "00099aa5edd6ab514bd36dadcd7624a72fd882991121bf67193809952e7e49c0",
        },
        PowVector {
            name: "four zeros",
            seed: "Patrick",
            prefix: "0000",
            counter: 13917,
            digest: "0000f7c943c61986f7d4005e3738e57bdedef80cd4489c12b88ba23810910596",
        },
        PowVector {
            name: "five zeros",
            seed: "Patrick",
            prefix: "00000",
            counter: 754605,
            digest: "000001b04a4bd83e9640fe9287a201ebab1dde13989e629f56e929ab7365174c",
        },
        PowVector {
            name: "non-zero prefix",
            seed: "Patrick",
            prefix: "abc",
            counter: 526,
            digest: "abcf1a951847214afb17fd614e330e57c8031575f9f8f5a933432bca02075774",
        },
        PowVector {
            name: "mixed prefix",
            seed: "Patrick",
            prefix: "0000a",
            counter: 337345,
            digest: "0000ac8eed14bfe17e8878b65d5ac78f07939fb1b378aef320cf5103ad7aea08",
        },
        PowVector {
            name: "other seed",
            seed: "alice",
            prefix: "000",
            counter: 6946,
            digest: "0001996ae39473d8f0561f566a782d72a092504b1012a67001d45bee709f673c",
        },
        PowVector {
            name: "short seed",
            seed: "bob",
            prefix: "ff",
            counter: 248,
            digest: "ff84c51bdeb9dc7edaab90b15cc38749b0b48382371c4fa906aa982bfdee5003",
        },
    ]
}

/// Get all Ed25519 signature vectors.
pub fn all_signature_vectors() -> Vec<SignatureVector> {
    vec![
        SignatureVector {
            name: "four-zero candidate",
            key_seed: [0x01; 32],
            message: "Patrick13917",
            public_key: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            signature: "3de7e6216f8a1210cbf3ef6c914e052302449ddd7dbf326b97efb2e48758fe39\
                        b1c70122b1a28e092849164c839a1fdcac7a09d61de2b728a1a323e8eb0b9809",
        },
        SignatureVector {
            name: "three-zero candidate",
            key_seed: [0x02; 32],
            message: "Patrick978",
            public_key: "8139770ea87d175f56a35466c34c7ecccb8d8a91b4ee37a25df60f5b8fc9b394",
            signature: "0cbb2b0a18851199d8d6e0ad3c2595bc3584e64e511cf07895390054f126cb8e\
                        af5075dceeb4558e849ae335ca92fee5d1a6ce79a9f70cd0e762dab0127d2202",
        },
        SignatureVector {
            name: "other seed candidate",
            key_seed: [0x42; 32],
            message: "alice6946",
            public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            signature: "f11fbb7b8c1bd4d6e81dc88a149c4d7f18c1def4835e02e381d0f4924b5578f0\
                        640f6734293d50fdac3e13bc7832e24f5fba4bece0131a67bd8a6eb2682efe09",
        },
    ]
}

#[derive(Serialize)]
struct VectorFile {
    pow: Vec<PowVector>,
    signatures: Vec<SignatureVector>,
}

/// Every vector as a pretty-printed JSON document with `pow` and
/// `signatures` arrays, for checking other implementations against.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&VectorFile {
        pow: all_pow_vectors(),
        signatures: all_signature_vectors(),
    })
}

/// Run the search for a vector.
pub fn search_vector(vector: &PowVector) -> (u64, String) {
    let seed = Seed::new(vector.seed).expect("vector seed is valid");
    let prefix = Prefix::new(vector.prefix).expect("vector prefix is valid");
    let result = PowSearch::default()
        .search(&seed, &prefix)
        .expect("unbounded search returns");
    (result.counter(), result.digest_hex())
}

/// Sign a vector's message with its deterministic key.
pub fn sign_vector(vector: &SignatureVector) -> (String, String) {
    let keypair = KeyPair::ed25519_from_seed(&vector.key_seed);
    let signature = keypair
        .sign(vector.message.as_bytes())
        .expect("ed25519 signing does not fail");
    let public_key = keypair.public_key().to_hex().expect("ed25519 key encodes");
    (public_key, signature.to_hex())
}

/// The vector's expected signature, decoded.
pub fn expected_signature(vector: &SignatureVector) -> Signature {
    Signature::from_hex(SignatureScheme::Ed25519, vector.signature)
        .expect("vector signature is hex")
}

/// The first counter below `counter` whose candidate already matches
/// `prefix`, if any. `None` means `counter` is minimal.
pub fn minimality_violation(
    seed: &Seed,
    prefix: &Prefix,
    counter: u64,
    algorithm: HashAlgorithm,
) -> Option<u64> {
    (0..counter).find(|&c| verify_pow(seed, c, prefix, algorithm))
}

/// Verify all vectors.
///
/// Returns `(name, matches, actual)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let pow = all_pow_vectors().into_iter().map(|v| {
        let (counter, digest) = search_vector(&v);
        let matches = counter == v.counter && digest == v.digest;
        (v.name.to_string(), matches, format!("{counter}:{digest}"))
    });

    let sig = all_signature_vectors().into_iter().map(|v| {
        let (public_key, signature) = sign_vector(&v);
        let matches = public_key == v.public_key && signature == v.signature;
        (v.name.to_string(), matches, signature)
    });

    pow.chain(sig).collect()
}

/// The candidate text a vector describes.
pub fn vector_candidate(vector: &PowVector) -> Candidate {
    let seed = Seed::new(vector.seed).expect("vector seed is valid");
    Candidate::new(&seed, vector.counter)
}
