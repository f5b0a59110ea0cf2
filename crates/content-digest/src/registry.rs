//! The algorithm registry: name → hash constructor, encoder and encoding rules.
//!
//! A process-wide instance is available through [`Registry::global`] and is
//! what the convenience methods on [`Algorithm`] and [`Digest`] use. Tests and
//! embedders that need isolation can build their own [`Registry`] and call the
//! same operations on it directly.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use crate::algorithm::{Algorithm, Digester};
use crate::digest::{Digest, DIGEST_REGEX_ANCHORED, ENCODED_REGEX_ANCHORED};
use crate::error::{DigestError, Result};
use crate::hasher::{Blake3Hasher, Hasher, Sha256Hasher, Sha384Hasher, Sha512Hasher};
use crate::verifier::Verifier;

/// Produces a fresh hash object.
pub type HashFactory = Arc<dyn Fn() -> Box<dyn Hasher> + Send + Sync>;

/// Turns raw hash output into the encoded portion of a digest.
pub type Encoder = Arc<dyn Fn(&[u8]) -> String + Send + Sync>;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Characters allowed in the encoded portion for one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// `[0-9a-f]+`, used by every built-in algorithm.
    LowerHex,
    /// `[a-zA-Z0-9=_-]+`, the generic digest grammar.
    Generic,
}

impl Charset {
    /// Whether `encoded` is non-empty and uses only allowed characters.
    pub fn matches(self, encoded: &str) -> bool {
        match self {
            Charset::LowerHex => {
                !encoded.is_empty()
                    && encoded
                        .bytes()
                        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
            }
            Charset::Generic => ENCODED_REGEX_ANCHORED.is_match(encoded),
        }
    }
}

/// Everything the registry knows about one algorithm.
#[derive(Clone)]
pub struct AlgorithmEntry {
    factory: HashFactory,
    encoder: Encoder,
    encoded_len: usize,
    charset: Charset,
}

impl AlgorithmEntry {
    /// Create an entry. An `encoded_len` of 0 disables the length check.
    pub fn new(factory: HashFactory, encoder: Encoder, encoded_len: usize, charset: Charset) -> Self {
        Self {
            factory,
            encoder,
            encoded_len,
            charset,
        }
    }

    /// A fresh hash object.
    pub fn hasher(&self) -> Box<dyn Hasher> {
        (self.factory)()
    }

    /// Encode raw hash output.
    pub fn encode(&self, raw: &[u8]) -> String {
        (self.encoder)(raw)
    }

    /// The encoder shared by every digest of this algorithm.
    pub fn encoder(&self) -> Encoder {
        Arc::clone(&self.encoder)
    }

    /// Exact length of the encoded portion, or 0 when unchecked.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    /// Allowed characters of the encoded portion.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Check an encoded value: length first, then characters.
    pub fn validate(&self, encoded: &str) -> Result<()> {
        if self.encoded_len != 0 && encoded.len() != self.encoded_len {
            return Err(DigestError::InvalidLength);
        }
        if !self.charset.matches(encoded) {
            return Err(DigestError::InvalidFormat);
        }
        Ok(())
    }
}

impl fmt::Debug for AlgorithmEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmEntry")
            .field("encoded_len", &self.encoded_len)
            .field("charset", &self.charset)
            .finish_non_exhaustive()
    }
}

/// Configuration for a [`Registry`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Register sha256, sha384, sha512 and blake3 on construction.
    pub builtins: bool,
    /// Whether a later registration for a known name replaces the entry.
    /// When false the first registration wins and later ones are refused.
    pub replace_existing: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            replace_existing: true,
        }
    }
}

/// Mapping from algorithm name to its hashing and encoding behavior.
///
/// Registration takes a write lock and lookups a read lock, so late
/// registration is safe alongside concurrent use. Entries are never removed.
pub struct Registry {
    config: RegistryConfig,
    entries: RwLock<HashMap<Algorithm, AlgorithmEntry>>,
}

impl Registry {
    /// A registry with the built-in algorithms.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// A registry with no algorithms at all.
    pub fn empty() -> Self {
        Self::with_config(RegistryConfig {
            builtins: false,
            ..RegistryConfig::default()
        })
    }

    /// A registry built from `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        let registry = Self {
            config,
            entries: RwLock::new(HashMap::new()),
        };
        if registry.config.builtins {
            registry.register_builtins();
        }
        registry
    }

    /// The process-wide registry, built with the default configuration on
    /// first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn register_builtins(&self) {
        self.insert(Algorithm::SHA256, builtin::<Sha256Hasher>(64));
        self.insert(Algorithm::SHA384, builtin::<Sha384Hasher>(96));
        self.insert(Algorithm::SHA512, builtin::<Sha512Hasher>(128));
        self.insert(Algorithm::BLAKE3, builtin::<Blake3Hasher>(64));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Register `algorithm` with lowercase hex encoding and no length check.
    ///
    /// Returns whether the registry now holds this registration (false only
    /// when the name exists and `replace_existing` is off).
    ///
    /// # Panics
    ///
    /// Panics if the name does not match the algorithm grammar.
    pub fn register<F>(&self, algorithm: impl Into<Algorithm>, factory: F) -> bool
    where
        F: Fn() -> Box<dyn Hasher> + Send + Sync + 'static,
    {
        let entry = AlgorithmEntry::new(Arc::new(factory), hex_encoder(), 0, Charset::Generic);
        self.insert(algorithm.into(), entry)
    }

    /// Register `algorithm` with a custom encoder and an exact encoded length
    /// (0 disables the length check).
    ///
    /// # Panics
    ///
    /// Panics if the name does not match the algorithm grammar.
    pub fn register_with_encoder<F, E>(
        &self,
        algorithm: impl Into<Algorithm>,
        factory: F,
        encoder: E,
        encoded_len: usize,
    ) -> bool
    where
        F: Fn() -> Box<dyn Hasher> + Send + Sync + 'static,
        E: Fn(&[u8]) -> String + Send + Sync + 'static,
    {
        let entry = AlgorithmEntry::new(
            Arc::new(factory),
            Arc::new(encoder),
            encoded_len,
            Charset::Generic,
        );
        self.insert(algorithm.into(), entry)
    }

    /// Register a fully specified entry.
    ///
    /// # Panics
    ///
    /// Panics if the name does not match the algorithm grammar.
    pub fn insert(&self, algorithm: Algorithm, entry: AlgorithmEntry) -> bool {
        assert!(
            algorithm.is_well_formed(),
            "invalid algorithm name {:?}",
            algorithm.as_str()
        );

        let mut entries = self.write();
        if entries.contains_key(&algorithm) {
            if !self.config.replace_existing {
                tracing::warn!(
                    "Refusing to re-register digest algorithm {}: already registered",
                    algorithm
                );
                return false;
            }
            tracing::warn!("Replacing registration of digest algorithm {}", algorithm);
        }

        tracing::debug!(
            "Registered digest algorithm {} (encoded length {})",
            algorithm,
            entry.encoded_len
        );
        entries.insert(algorithm, entry);
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether `name` is registered.
    pub fn available(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// The entry registered for `name`.
    pub fn lookup(&self, name: &str) -> Option<AlgorithmEntry> {
        self.read().get(name).cloned()
    }

    /// All registered algorithms, sorted by name.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        let mut algorithms: Vec<_> = self.read().keys().cloned().collect();
        algorithms.sort();
        algorithms
    }

    fn entry(&self, algorithm: &Algorithm) -> AlgorithmEntry {
        match self.lookup(algorithm.as_str()) {
            Some(entry) => entry,
            None => panic!("digest algorithm {:?} is not available", algorithm.as_str()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// A fresh hash object for `algorithm`.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn hasher(&self, algorithm: &Algorithm) -> Box<dyn Hasher> {
        self.entry(algorithm).hasher()
    }

    /// Encode raw hash output for `algorithm`.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn encode(&self, algorithm: &Algorithm, raw: &[u8]) -> String {
        self.entry(algorithm).encode(raw)
    }

    /// A running hash for `algorithm`.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn digester(&self, algorithm: &Algorithm) -> Digester {
        let entry = self.entry(algorithm);
        Digester::new(algorithm.clone(), entry.hasher(), entry.encoder())
    }

    /// Digest `data` in one step.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn digest_bytes(&self, algorithm: &Algorithm, data: &[u8]) -> Digest {
        let mut digester = self.digester(algorithm);
        digester.update(data);
        digester.digest()
    }

    /// Digest everything `reader` yields until end of stream. The first read
    /// error is returned as is.
    ///
    /// # Panics
    ///
    /// Panics if the algorithm is not registered.
    pub fn digest_reader<R: Read>(&self, algorithm: &Algorithm, mut reader: R) -> io::Result<Digest> {
        let mut digester = self.digester(algorithm);
        io::copy(&mut reader, &mut digester)?;
        Ok(digester.digest())
    }

    /// Check an encoded value against `algorithm`'s rules.
    pub fn validate_encoded(&self, algorithm: &Algorithm, encoded: &str) -> Result<()> {
        match self.lookup(algorithm.as_str()) {
            Some(entry) => entry.validate(encoded),
            None => Err(DigestError::Unsupported),
        }
    }

    /// Validate a digest string.
    ///
    /// A registered algorithm checks the encoded portion with its own rules. An
    /// unregistered one is `Unsupported` if the whole string still fits the
    /// generic digest grammar and `InvalidFormat` otherwise.
    pub fn validate(&self, digest: &Digest) -> Result<()> {
        let result = self.check(digest);
        if let Err(e) = result {
            tracing::trace!("Digest {:?} failed validation: {}", digest.as_str(), e);
        }
        result
    }

    fn check(&self, digest: &Digest) -> Result<()> {
        let (algorithm, encoded) = match digest.split() {
            Some((algorithm, encoded)) if !encoded.is_empty() => (algorithm, encoded),
            _ => return Err(DigestError::InvalidFormat),
        };

        match self.lookup(algorithm) {
            Some(entry) => entry.validate(encoded),
            None if DIGEST_REGEX_ANCHORED.is_match(digest.as_str()) => {
                Err(DigestError::Unsupported)
            }
            None => Err(DigestError::InvalidFormat),
        }
    }

    /// A verifier for streamed content that should hash to `digest`.
    ///
    /// # Panics
    ///
    /// Panics if the digest has no separator or its algorithm is not registered.
    pub fn verifier(&self, digest: &Digest) -> Verifier {
        let entry = self.entry(&digest.algorithm());
        Verifier::new(digest.clone(), entry.hasher(), entry.encoder())
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Algorithm, AlgorithmEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Algorithm, AlgorithmEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("algorithms", &self.algorithms())
            .finish()
    }
}

/// Register `algorithm` in the process-wide registry with hex encoding and no
/// length check. See [`Registry::register`].
///
/// # Panics
///
/// Panics if the name does not match the algorithm grammar.
pub fn register_algorithm<F>(algorithm: impl Into<Algorithm>, factory: F) -> bool
where
    F: Fn() -> Box<dyn Hasher> + Send + Sync + 'static,
{
    Registry::global().register(algorithm, factory)
}

/// Register `algorithm` in the process-wide registry with a custom encoder.
/// See [`Registry::register_with_encoder`].
///
/// # Panics
///
/// Panics if the name does not match the algorithm grammar.
pub fn register_algorithm_with_encoder<F, E>(
    algorithm: impl Into<Algorithm>,
    factory: F,
    encoder: E,
    encoded_len: usize,
) -> bool
where
    F: Fn() -> Box<dyn Hasher> + Send + Sync + 'static,
    E: Fn(&[u8]) -> String + Send + Sync + 'static,
{
    Registry::global().register_with_encoder(algorithm, factory, encoder, encoded_len)
}

fn hex_encoder() -> Encoder {
    Arc::new(|raw: &[u8]| hex::encode(raw))
}

fn builtin<H: Hasher + Default + 'static>(encoded_len: usize) -> AlgorithmEntry {
    AlgorithmEntry::new(
        Arc::new(|| Box::new(H::default()) as Box<dyn Hasher>),
        hex_encoder(),
        encoded_len,
        Charset::LowerHex,
    )
}
