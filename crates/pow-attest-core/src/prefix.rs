//! The difficulty target: a required leading substring of the hex digest.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::digest::{Digest, DIGEST_HEX_LEN};
use crate::error::SearchError;

/// A validated lowercase hex prefix.
///
/// Matching is case-sensitive against lowercase hex, so uppercase digits
/// are rejected rather than silently never matching. The prefix must be
/// strictly shorter than a hex digest.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix {
    text: String,
    nibbles: Vec<u8>,
}

impl Prefix {
    /// Validate and parse a prefix.
    pub fn new(text: &str) -> Result<Self, SearchError> {
        if text.len() >= DIGEST_HEX_LEN {
            return Err(SearchError::invalid_prefix(
                text,
                format!(
                    "length {} must be less than {}",
                    text.len(),
                    DIGEST_HEX_LEN
                ),
            ));
        }

        let nibbles = text
            .chars()
            .map(|c| match c {
                '0'..='9' | 'a'..='f' => Ok(c.to_digit(16).unwrap_or_default() as u8),
                _ => Err(SearchError::invalid_prefix(
                    text,
                    format!("{c:?} is not a lowercase hex digit"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            text: text.to_string(),
            nibbles,
        })
    }

    /// A prefix of `count` zero digits.
    pub fn zeros(count: usize) -> Result<Self, SearchError> {
        Self::new(&"0".repeat(count))
    }

    /// The prefix text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of hex digits required.
    pub fn len(&self) -> usize {
        self.nibbles.len()
    }

    /// Whether this prefix accepts every digest.
    pub fn is_empty(&self) -> bool {
        self.nibbles.is_empty()
    }

    /// Check a digest without hex-encoding it.
    pub fn matches(&self, digest: &Digest) -> bool {
        self.nibbles
            .iter()
            .enumerate()
            .all(|(i, &n)| digest.nibble(i) == n)
    }

    /// Check an already hex-encoded digest.
    pub fn matches_hex(&self, digest_hex: &str) -> bool {
        digest_hex.starts_with(&self.text)
    }

    /// Mean number of attempts to find a match (`16^len`).
    pub fn expected_attempts(&self) -> f64 {
        16f64.powi(self.len() as i32)
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix({:?})", self.text)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for Prefix {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Prefix {
    type Error = SearchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<Prefix> for String {
    fn from(prefix: Prefix) -> Self {
        prefix.text
    }
}
