//! Strong type definitions for the search inputs and outputs.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

use crate::error::SearchError;

/// The identity text a proof of work is bound to (for example a nickname).
///
/// Never empty. Hashed and signed as UTF-8.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

impl Seed {
    pub fn new(text: impl Into<String>) -> Result<Self, SearchError> {
        let text = text.into();
        if text.is_empty() {
            return Err(SearchError::EmptySeed);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({:?})", self.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Seed {
    type Error = SearchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Seed {
    type Error = SearchError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

/// The exact text that is hashed and signed: seed followed by the decimal
/// counter, with no separator.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    /// Build the candidate for `counter`.
    pub fn new(seed: &Seed, counter: u64) -> Self {
        let mut text = String::with_capacity(seed.as_str().len() + 20);
        write_candidate(&mut text, seed, counter);
        Self(text)
    }

    /// Wrap arbitrary text, e.g. a candidate received from elsewhere.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The UTF-8 bytes that are hashed and signed.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// A copy with `suffix` appended.
    pub fn tampered(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Candidate({:?})", self.0)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for Candidate {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Overwrite `buf` with the candidate text for `counter`.
///
/// The search loop reuses one buffer for every attempt.
pub(crate) fn write_candidate(buf: &mut String, seed: &Seed, counter: u64) {
    buf.clear();
    buf.push_str(seed.as_str());
    // Writing into a String cannot fail.
    let _ = write!(buf, "{counter}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_seed_rejected() {
        assert_eq!(Seed::new(""), Err(SearchError::EmptySeed));
        assert!(Seed::try_from("Patrick").is_ok());
    }

    #[test]
    fn test_candidate_format() {
        let seed = Seed::new("Patrick").unwrap();
        assert_eq!(Candidate::new(&seed, 0).as_str(), "Patrick0");
        assert_eq!(Candidate::new(&seed, 13917).as_str(), "Patrick13917");
        assert_eq!(
            Candidate::new(&seed, u64::MAX).as_str(),
            "Patrick18446744073709551615"
        );
    }

    #[test]
    fn test_candidate_non_ascii_seed() {
        let seed = Seed::new("帕特里克").unwrap();
        let candidate = Candidate::new(&seed, 7);
        assert_eq!(candidate.as_bytes(), "帕特里克7".as_bytes());
    }

    #[test]
    fn test_buffer_reuse() {
        let seed = Seed::new("bob").unwrap();
        let mut buf = String::new();
        write_candidate(&mut buf, &seed, 1000);
        write_candidate(&mut buf, &seed, 9);
        assert_eq!(buf, "bob9");
    }

    proptest! {
        #[test]
        fn test_candidate_is_seed_then_decimal(seed in "\\PC{1,12}", counter in any::<u64>()) {
            let candidate = Candidate::new(&Seed::new(seed.clone()).unwrap(), counter);
            let digits = candidate.as_str().strip_prefix(seed.as_str()).unwrap();

            prop_assert_eq!(digits.parse::<u64>().unwrap(), counter);
            prop_assert!(digits == "0" || !digits.starts_with('0'));
            prop_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_tampered_appends() {
        let seed = Seed::new("Patrick").unwrap();
        let candidate = Candidate::new(&seed, 5);
        assert_eq!(candidate.tampered("x").as_str(), "Patrick5x");
        assert_eq!(candidate.as_str(), "Patrick5");
    }
}
