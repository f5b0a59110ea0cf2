//! Algorithm names and the operations keyed by them.
//!
//! An [`Algorithm`] is only a name. Everything it can do (hashing, encoding,
//! validating) is resolved through the process-wide [`Registry`] at call time.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::error::{DigestError, Result};
use crate::hasher::Hasher;
use crate::registry::{Encoder, Registry};

/// Grammar for algorithm names: lowercase alphanumeric tokens joined by single
/// `.`, `+`, `_` or `-` separators.
pub const ALGORITHM_PATTERN: &str = r"[a-z0-9]+(?:[.+_-][a-z0-9]+)*";

static ALGORITHM_REGEX_ANCHORED: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{ALGORITHM_PATTERN}$")).expect("valid algorithm pattern"));

/// The name of a hashing scheme, e.g. `sha256`.
///
/// Constructing an `Algorithm` never checks the name. Use
/// [`Algorithm::is_well_formed`] or [`Algorithm::available`] when the name
/// comes from outside the program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Algorithm(Cow<'static, str>);

impl Algorithm {
    /// SHA-256, hex encoded, 64 characters.
    pub const SHA256: Self = Self::from_static("sha256");

    /// SHA-384, hex encoded, 96 characters.
    pub const SHA384: Self = Self::from_static("sha384");

    /// SHA-512, hex encoded, 128 characters.
    pub const SHA512: Self = Self::from_static("sha512");

    /// Blake3 (32-byte output), hex encoded, 64 characters.
    pub const BLAKE3: Self = Self::from_static("blake3");

    /// The default algorithm used by the crate-level `from_*` helpers.
    pub const CANONICAL: Self = Self::SHA256;

    /// Create an algorithm from a static name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create an algorithm from any name. The name is not checked.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The algorithm name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name matches the algorithm grammar.
    pub fn is_well_formed(&self) -> bool {
        ALGORITHM_REGEX_ANCHORED.is_match(&self.0)
    }

    /// Whether the algorithm is registered in the process-wide registry.
    pub fn available(&self) -> bool {
        Registry::global().available(self.as_str())
    }

    /// A fresh hash object for this algorithm.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn hash(&self) -> Box<dyn Hasher> {
        Registry::global().hasher(self)
    }

    /// Encode raw hash output with this algorithm's encoder.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn encode(&self, raw: &[u8]) -> String {
        Registry::global().encode(self, raw)
    }

    /// A running hash that produces a [`Digest`] for this algorithm.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn digester(&self) -> Digester {
        Registry::global().digester(self)
    }

    /// Digest everything `reader` yields until end of stream.
    ///
    /// Read errors are returned unchanged and no digest is produced.
    pub fn from_reader<R: Read>(&self, reader: R) -> io::Result<Digest> {
        Registry::global().digest_reader(self, reader)
    }

    /// Digest an in-memory byte slice.
    pub fn from_bytes(&self, data: &[u8]) -> Digest {
        Registry::global().digest_bytes(self, data)
    }

    /// Digest the UTF-8 bytes of `text`.
    pub fn from_string(&self, text: &str) -> Digest {
        self.from_bytes(text.as_bytes())
    }

    /// Check an encoded hash value against this algorithm's rules.
    ///
    /// Fails with [`DigestError::Unsupported`] if the algorithm is not
    /// registered, [`DigestError::InvalidLength`] if the length is wrong and
    /// [`DigestError::InvalidFormat`] if the characters are not allowed.
    pub fn validate(&self, encoded: &str) -> Result<()> {
        Registry::global().validate_encoded(self, encoded)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Algorithm {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Algorithm {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Algorithm {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Parses a user-supplied algorithm choice.
///
/// An empty string selects [`Algorithm::CANONICAL`]; any other name must be
/// registered.
impl FromStr for Algorithm {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self> {
        let algorithm = if s.is_empty() {
            Self::CANONICAL
        } else {
            Self::new(s)
        };

        if !algorithm.available() {
            return Err(DigestError::Unsupported);
        }
        Ok(algorithm)
    }
}

/// A running hash bound to one algorithm.
///
/// Feed it with [`Digester::update`] or through [`std::io::Write`], then call
/// [`Digester::digest`] to obtain the identifier.
pub struct Digester {
    algorithm: Algorithm,
    hasher: Box<dyn Hasher>,
    encoder: Encoder,
}

impl Digester {
    pub(crate) fn new(algorithm: Algorithm, hasher: Box<dyn Hasher>, encoder: Encoder) -> Self {
        Self {
            algorithm,
            hasher,
            encoder,
        }
    }

    /// The algorithm this digester computes.
    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Absorb more content.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finish hashing and build the digest.
    pub fn digest(self) -> Digest {
        let encoded = (self.encoder)(&self.hasher.finalize());
        Digest::from_encoded(&self.algorithm, &encoded)
    }
}

impl Write for Digester {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for Digester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digester")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
