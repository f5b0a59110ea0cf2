//! The digest identifier type.
//!
//! A [`Digest`] is the text `<algorithm>:<encoded>`, for example
//!
//! ```text
//! sha256:7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc
//! ```
//!
//! The text is the wire and storage format and is kept byte-for-byte.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::algorithm::{Algorithm, ALGORITHM_PATTERN};
use crate::error::{DigestError, Result};
use crate::hasher::Hasher;
use crate::registry::Registry;
use crate::verifier::Verifier;

/// Grammar for the encoded portion of a digest.
pub const ENCODED_PATTERN: &str = r"[a-zA-Z0-9=_-]+";

/// Matches digests anywhere in a string.
pub static DIGEST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{ALGORITHM_PATTERN}:{ENCODED_PATTERN}")).expect("valid digest pattern")
});

/// Matches a string that is exactly one digest.
pub static DIGEST_REGEX_ANCHORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{ALGORITHM_PATTERN}:{ENCODED_PATTERN}$"))
        .expect("valid digest pattern")
});

pub(crate) static ENCODED_REGEX_ANCHORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{ENCODED_PATTERN}$")).expect("valid encoded pattern")
});

/// A content-addressable identifier: an algorithm name and an encoded hash.
///
/// Holding a `Digest` does not mean it is valid. [`Digest::parse`] validates;
/// [`Digest::from_encoded`] and serde deserialization trust their input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Parse and validate a digest string against the process-wide registry.
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let digest = Self(s.into());
        digest.validate()?;
        Ok(digest)
    }

    /// Build a digest from raw hash bytes, encoding them with the algorithm's
    /// encoder. The result is not validated.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn from_bytes(algorithm: &Algorithm, raw: &[u8]) -> Self {
        Self::from_encoded(algorithm, &algorithm.encode(raw))
    }

    /// Build a digest from an already encoded hash. Nothing is checked.
    pub fn from_encoded(algorithm: &Algorithm, encoded: &str) -> Self {
        Self(format!("{algorithm}:{encoded}"))
    }

    /// Finish `hasher` and build a digest from its output.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn from_hasher(algorithm: &Algorithm, hasher: Box<dyn Hasher>) -> Self {
        Self::from_bytes(algorithm, &hasher.finalize())
    }

    /// Check the digest against the process-wide registry.
    ///
    /// Returns exactly one of [`DigestError::InvalidFormat`],
    /// [`DigestError::Unsupported`] or [`DigestError::InvalidLength`] on failure.
    pub fn validate(&self) -> Result<()> {
        Registry::global().validate(self)
    }

    /// The algorithm portion.
    ///
    /// # Panics
    ///
    /// Panics if there is no `:` separator. Validate untrusted input first.
    pub fn algorithm(&self) -> Algorithm {
        let (algorithm, _) = self.components();
        Algorithm::new(algorithm)
    }

    /// The encoded portion.
    ///
    /// # Panics
    ///
    /// Panics if there is no `:` separator. Validate untrusted input first.
    pub fn encoded(&self) -> &str {
        let (_, encoded) = self.components();
        encoded
    }

    /// A verifier that checks streamed content against this digest.
    ///
    /// # Panics
    ///
    /// Panics if the digest has no separator or its algorithm is not registered.
    pub fn verifier(&self) -> Verifier {
        Registry::global().verifier(self)
    }

    /// The digest text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the digest and return its text.
    pub fn into_string(self) -> String {
        self.0
    }

    pub(crate) fn split(&self) -> Option<(&str, &str)> {
        self.0.split_once(':')
    }

    fn components(&self) -> (&str, &str) {
        match self.split() {
            Some(parts) => parts,
            None => panic!("no ':' separator in digest {:?}", self.0),
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
