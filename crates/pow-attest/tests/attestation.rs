//! End-to-end attestation scenarios: generate keys, search, sign, verify,
//! tamper.

use std::num::NonZeroUsize;
use std::time::Duration;

use pow_attest::{
    sign, verify, AttestError, AttestationRecord, Attestor, AttestorConfig, HashAlgorithm,
    SearchError, SignatureScheme, VerificationOutcome,
};
use pow_attest_testkit::{multi_party_fixtures, shared_rsa_keypair, TestFixture};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn patrick_scenario_ed25519() {
    init_tracing();
    let attestor = Attestor::generate(AttestorConfig::default()).unwrap();

    let attestation = attestor.attest("Patrick", "0000").unwrap();
    let pow = attestation.pow();
    assert_eq!(pow.candidate().as_str(), format!("Patrick{}", pow.counter()));
    assert!(pow.digest_hex().starts_with("0000"));

    let candidate = pow.candidate().as_bytes();
    assert_eq!(
        verify(attestor.public_key(), candidate, attestation.signature()),
        VerificationOutcome::Valid
    );

    let mut tampered = candidate.to_vec();
    tampered.push(b'x');
    assert_eq!(
        verify(attestor.public_key(), &tampered, attestation.signature()),
        VerificationOutcome::Invalid
    );

    assert!(attestor.demonstrate_tamper(&attestation, "x").holds());
}

#[test]
fn patrick_scenario_rsa() {
    init_tracing();
    let attestor = Attestor::new(
        shared_rsa_keypair().clone(),
        AttestorConfig::default().with_scheme(SignatureScheme::RsaSha256),
    );

    let attestation = attestor.attest("Patrick", "0000").unwrap();
    assert_eq!(attestation.pow().counter(), 13917);
    assert_eq!(attestation.signature().scheme(), SignatureScheme::RsaSha256);
    assert!(attestation.verify().is_valid());

    let report = attestor.demonstrate_tamper(&attestation, "x");
    assert_eq!(report.original, VerificationOutcome::Valid);
    assert_eq!(report.tampered, VerificationOutcome::Invalid);
}

#[test]
fn wrong_key_rejected_across_parties() {
    let parties = multi_party_fixtures(2);
    let attestation = parties[0].attest("Patrick", "00");

    assert!(verify(parties[0].public_key(), attestation.payload(), attestation.signature()).is_valid());
    assert!(!verify(parties[1].public_key(), attestation.payload(), attestation.signature()).is_valid());

    let rsa = shared_rsa_keypair();
    assert!(!verify(rsa.public_key(), attestation.payload(), attestation.signature()).is_valid());
}

#[test]
fn signing_the_exact_bytes() {
    let fixture = TestFixture::with_seed([3u8; 32]);
    let signature = sign(fixture.keypair.private_key(), "Patrick5".as_bytes()).unwrap();

    assert!(verify(fixture.public_key(), b"Patrick5", &signature).is_valid());
    assert!(!verify(fixture.public_key(), b"patrick5", &signature).is_valid());
    assert!(!verify(fixture.public_key(), b"Patrick5 ", &signature).is_valid());
    assert!(!verify(fixture.public_key(), b"Patrick", &signature).is_valid());
}

#[test]
fn blake3_attestation() {
    let fixture = TestFixture::with_seed([4u8; 32]);
    let attestor = fixture.attestor(AttestorConfig::default().with_hash(HashAlgorithm::Blake3));

    let attestation = attestor.attest("Patrick", "000").unwrap();
    assert_eq!(attestation.pow().algorithm(), HashAlgorithm::Blake3);
    assert!(attestation.verify().is_valid());

    let record = attestation.to_record().unwrap();
    assert_eq!(record.hash, HashAlgorithm::Blake3);
    assert!(record.verify().is_valid());
}

#[test]
fn parallel_and_sequential_attestations_agree() {
    let fixture = TestFixture::with_seed([5u8; 32]);
    let sequential = fixture.attest("alice", "000");
    let parallel = fixture
        .attestor(AttestorConfig::default().with_workers(NonZeroUsize::new(3).unwrap()))
        .attest("alice", "000")
        .unwrap();

    assert_eq!(sequential.pow().counter(), 6946);
    assert_eq!(parallel.pow().counter(), sequential.pow().counter());
    assert_eq!(parallel.signature(), sequential.signature());
}

#[test]
fn bounded_searches_report_errors() {
    let fixture = TestFixture::with_seed([6u8; 32]);

    let capped = fixture.attestor(AttestorConfig::default().with_max_attempts(13917));
    assert!(matches!(
        capped.attest("Patrick", "0000"),
        Err(AttestError::Search(SearchError::NotFound { attempts: 13917 }))
    ));

    let timed = fixture.attestor(AttestorConfig::default().with_deadline(Duration::ZERO));
    assert!(matches!(
        timed.attest("Patrick", "0000"),
        Err(AttestError::Search(SearchError::Timeout { .. }))
    ));
}

#[test]
fn rsa_record_roundtrip() {
    let fixture = TestFixture::rsa();
    let attestation = fixture.attest("bob", "ff");
    let json = attestation.to_record().unwrap().to_json().unwrap();

    let record = AttestationRecord::from_json(&json).unwrap();
    assert_eq!(record.scheme, SignatureScheme::RsaSha256);
    assert_eq!(record.counter, 248);
    assert!(record.verify().is_valid());

    let (public_key, _) = record.decode_keys().unwrap();
    assert_eq!(&public_key, fixture.public_key());

    let mut forged = record.clone();
    forged.candidate.push('x');
    assert_eq!(forged.verify(), VerificationOutcome::Invalid);
}

mod properties {
    use super::*;
    use pow_attest_testkit::generators::{keypair, prefix, seed, suffix};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn attestations_verify_and_detect_tampering(
            kp in keypair(),
            identity in seed(),
            target in prefix(2),
            extra in suffix(),
        ) {
            let attestor = Attestor::new(kp, AttestorConfig::default());
            let attestation = attestor.attest(identity.as_str(), target.as_str()).unwrap();

            prop_assert!(attestation.pow().digest_hex().starts_with(target.as_str()));
            prop_assert!(attestation.verify().is_valid());
            prop_assert!(attestor.demonstrate_tamper(&attestation, &extra).holds());

            let record = attestation.to_record().unwrap();
            prop_assert!(record.verify().is_valid());
        }
    }
}
