//! Attestations: a proof of work plus a signature over its candidate.

use serde::{Deserialize, Serialize};

use pow_attest_core::{
    verify, Candidate, HashAlgorithm, PowResult, Prefix, PublicKey, Seed, Signature,
    SignatureScheme, VerificationOutcome,
};

use crate::error::{AttestError, Result};

/// Suffix appended by the tamper check when none is given.
pub const DEFAULT_TAMPER_SUFFIX: &str = "x";

/// A signed proof of work.
///
/// The signed payload is exactly `pow.candidate()` as UTF-8.
#[derive(Debug, Clone)]
pub struct Attestation {
    seed: Seed,
    prefix: Prefix,
    pow: PowResult,
    public_key: PublicKey,
    signature: Signature,
}

impl Attestation {
    pub(crate) fn new(
        seed: Seed,
        prefix: Prefix,
        pow: PowResult,
        public_key: PublicKey,
        signature: Signature,
    ) -> Self {
        Self {
            seed,
            prefix,
            pow,
            public_key,
            signature,
        }
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn pow(&self) -> &PowResult {
        &self.pow
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The bytes that were signed.
    pub fn payload(&self) -> &[u8] {
        self.pow.candidate().as_bytes()
    }

    /// Check only the signature over the candidate.
    pub fn verify_signature(&self) -> VerificationOutcome {
        verify(&self.public_key, self.payload(), &self.signature)
    }

    /// Check the signature and that the proof of work still holds: the
    /// candidate is `seed ++ counter`, hashes to the digest, and the digest
    /// carries the prefix.
    pub fn verify(&self) -> VerificationOutcome {
        let pow_holds = self.pow.candidate() == &Candidate::new(&self.seed, self.pow.counter())
            && self.pow.verify(&self.prefix);
        self.verify_signature().and(pow_holds.into())
    }

    /// Verify the untouched candidate and the candidate with `suffix`
    /// appended, both against the original signature.
    pub fn tamper_check(&self, suffix: &str) -> TamperReport {
        let tampered = self.pow.candidate().tampered(suffix);
        TamperReport {
            original: self.verify_signature(),
            tampered: verify(&self.public_key, tampered.as_bytes(), &self.signature),
        }
    }

    /// Hex/JSON-friendly form for export.
    pub fn to_record(&self) -> Result<AttestationRecord> {
        Ok(AttestationRecord {
            seed: self.seed.to_string(),
            prefix: self.prefix.to_string(),
            counter: self.pow.counter(),
            candidate: self.pow.candidate().to_string(),
            hash: self.pow.algorithm(),
            digest: self.pow.digest_hex(),
            elapsed_secs: self.pow.elapsed().as_secs_f64(),
            scheme: self.signature.scheme(),
            public_key: self.public_key.to_hex()?,
            signature: self.signature.to_hex(),
        })
    }
}

/// Outcome of verifying a payload before and after tampering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TamperReport {
    pub original: VerificationOutcome,
    pub tampered: VerificationOutcome,
}

impl TamperReport {
    /// True iff the original verifies and the tampered payload does not.
    pub fn holds(&self) -> bool {
        self.original.is_valid() && !self.tampered.is_valid()
    }
}

/// Serializable attestation. Keys and signatures are hex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestationRecord {
    pub seed: String,
    pub prefix: String,
    pub counter: u64,
    pub candidate: String,
    pub hash: HashAlgorithm,
    pub digest: String,
    pub elapsed_secs: f64,
    pub scheme: SignatureScheme,
    pub public_key: String,
    pub signature: String,
}

impl AttestationRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode the public key and signature.
    pub fn decode_keys(&self) -> Result<(PublicKey, Signature)> {
        let public_key = PublicKey::from_hex(self.scheme, &self.public_key)?;
        let signature = Signature::from_hex(self.scheme, &self.signature)?;
        Ok((public_key, signature))
    }

    /// Verify offline. Anything that fails to decode is `Invalid`.
    pub fn verify(&self) -> VerificationOutcome {
        match self.check() {
            Ok(outcome) => outcome,
            Err(_) => VerificationOutcome::Invalid,
        }
    }

    fn check(&self) -> Result<VerificationOutcome> {
        let seed = Seed::new(self.seed.as_str())?;
        let prefix = Prefix::new(&self.prefix)?;
        let (public_key, signature) = self.decode_keys()?;

        let expected = Candidate::new(&seed, self.counter);
        if expected.as_str() != self.candidate {
            return Err(AttestError::MalformedRecord(
                "candidate does not match seed and counter".into(),
            ));
        }

        let digest = self.hash.digest(expected.as_bytes());
        let pow_holds = digest.to_hex() == self.digest && prefix.matches(&digest);

        Ok(verify(&public_key, expected.as_bytes(), &signature).and(pow_holds.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pow_attest_core::{KeyPair, PowSearch};

    fn attestation(seed: &str, prefix: &str) -> Attestation {
        let keypair = KeyPair::ed25519_from_seed(&[9u8; 32]);
        let seed = Seed::new(seed).unwrap();
        let prefix = Prefix::new(prefix).unwrap();
        let pow = PowSearch::default().search(&seed, &prefix).unwrap();
        let signature = keypair.sign(pow.candidate().as_bytes()).unwrap();
        Attestation::new(seed, prefix, pow, keypair.public_key().clone(), signature)
    }

    #[test]
    fn test_verify_valid() {
        let att = attestation("Patrick", "00");
        assert_eq!(att.payload(), b"Patrick562");
        assert!(att.verify_signature().is_valid());
        assert!(att.verify().is_valid());
    }

    #[test]
    fn test_tamper_check() {
        let att = attestation("Patrick", "0");
        let report = att.tamper_check(DEFAULT_TAMPER_SUFFIX);
        assert_eq!(report.original, VerificationOutcome::Valid);
        assert_eq!(report.tampered, VerificationOutcome::Invalid);
        assert!(report.holds());

        // An empty suffix is not tampering.
        assert!(!att.tamper_check("").holds());
    }

    #[test]
    fn test_wrong_seed_fails_pow_check() {
        let att = attestation("Patrick", "0");
        let forged = Attestation::new(
            Seed::new("Mallory").unwrap(),
            att.prefix.clone(),
            att.pow.clone(),
            att.public_key.clone(),
            att.signature.clone(),
        );
        assert!(forged.verify_signature().is_valid());
        assert!(!forged.verify().is_valid());
    }

    #[test]
    fn test_record_roundtrip_verifies() {
        let att = attestation("Patrick", "000");
        let record = att.to_record().unwrap();
        assert_eq!(record.counter, 978);
        assert_eq!(record.candidate, "Patrick978");

        let json = record.to_json().unwrap();
        let parsed = AttestationRecord::from_json(&json).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.verify().is_valid());
    }

    #[test]
    fn test_record_tampering_detected() {
        let record = attestation("Patrick", "00").to_record().unwrap();

        let mut candidate = record.clone();
        candidate.candidate.push('x');
        assert!(!candidate.verify().is_valid());

        let mut counter = record.clone();
        counter.counter += 1;
        counter.candidate = format!("Patrick{}", counter.counter);
        assert!(!counter.verify().is_valid());

        let mut prefix = record.clone();
        prefix.prefix = "0000000".into();
        assert!(!prefix.verify().is_valid());

        let mut key = record.clone();
        key.public_key = "00".into();
        assert!(!key.verify().is_valid());
        assert!(key.decode_keys().is_err());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            AttestationRecord::from_json("{"),
            Err(AttestError::MalformedRecord(_))
        ));
    }
}
