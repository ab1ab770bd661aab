//! Hash primitives used by the proof-of-work search.
//!
//! Both supported algorithms produce 32-byte digests, so every hex digest
//! is exactly [`DIGEST_HEX_LEN`] characters long.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// The one-way function applied to each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    /// Hash `data` with this algorithm.
    pub fn digest(&self, data: &[u8]) -> Digest {
        match self {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                Digest(hasher.finalize().into())
            }
            HashAlgorithm::Blake3 => Digest(*blake3::hash(data).as_bytes()),
        }
    }

    /// Stable lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 32-byte digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != DIGEST_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; DIGEST_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The `i`th hex digit (high nibble first).
    pub(crate) fn nibble(&self, i: usize) -> u8 {
        let byte = self.0[i / 2];
        if i % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0f
        }
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_digest() {
        let digest = HashAlgorithm::Sha256.digest(b"Patrick13917");
        assert_eq!(
            digest.to_hex(),
            "0000f7c943c61986f7d4005e3738e57bdedef80cd4489c12b88ba23810910596"
        );
    }

    #[test]
    fn test_algorithms_differ() {
        let data = b"Patrick0";
        assert_ne!(
            HashAlgorithm::Sha256.digest(data),
            HashAlgorithm::Blake3.digest(data)
        );
        assert_eq!(
            HashAlgorithm::Blake3.digest(data),
            HashAlgorithm::Blake3.digest(data)
        );
    }

    #[test]
    fn test_hex_is_lowercase_and_fixed_length() {
        let hex = HashAlgorithm::Blake3.digest(b"anything").to_hex();
        assert_eq!(hex.len(), DIGEST_HEX_LEN);
        assert_eq!(hex, hex.to_lowercase());
    }

    #[test]
    fn test_nibbles_follow_hex() {
        let digest = HashAlgorithm::Sha256.digest(b"bob248");
        let hex = digest.to_hex();
        for (i, c) in hex.chars().enumerate() {
            assert_eq!(digest.nibble(i), c.to_digit(16).unwrap() as u8);
        }
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Digest::from_hex("00ff").is_err());
    }

    #[test]
    fn test_serde_as_hex() {
        let digest = HashAlgorithm::Sha256.digest(b"Patrick5");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{}\"", digest.to_hex()));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }
}
