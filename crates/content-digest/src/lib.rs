//! # content-digest
//!
//! Content-addressable identifiers of the form `<algorithm>:<encoded>`, e.g.
//! `sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9`.
//!
//! This crate names, encodes, validates and verifies digests. It does not
//! store content and does not implement hash functions; those come from
//! `sha2` and `blake3` behind the [`Hasher`] trait.
//!
//! ## Key Types
//!
//! - [`Registry`] - Algorithm name → hash constructor, encoder and length rule
//! - [`Algorithm`] - A hashing scheme name; digests bytes and readers
//! - [`Digest`] - The identifier string, with parsing and validation
//! - [`Verifier`] - Checks streamed content against an expected digest
//!
//! ## Usage
//!
//! ```rust
//! use content_digest::{Algorithm, Digest, DigestError};
//!
//! let digest = content_digest::from_bytes(b"hello world");
//! assert_eq!(digest.algorithm(), Algorithm::SHA256);
//!
//! // Untrusted input must be parsed before using the accessors.
//! let parsed = Digest::parse(digest.to_string()).unwrap();
//! assert_eq!(Digest::parse("sha256:abc"), Err(DigestError::InvalidLength));
//!
//! let mut verifier = parsed.verifier();
//! verifier.write(b"hello world");
//! assert!(verifier.verified());
//! ```
//!
//! ## Errors and panics
//!
//! Problems with external data (malformed strings, wrong lengths, unknown
//! algorithms) are returned as [`DigestError`]. Misuse by the calling code,
//! such as registering a malformed algorithm name or hashing with an
//! unregistered algorithm, panics.

pub mod algorithm;
pub mod digest;
pub mod error;
pub mod hasher;
pub mod registry;
pub mod verifier;

use std::io::{self, Read};

pub use algorithm::{Algorithm, Digester, ALGORITHM_PATTERN};
pub use digest::{Digest, DIGEST_REGEX, DIGEST_REGEX_ANCHORED, ENCODED_PATTERN};
pub use error::{DigestError, Result};
pub use hasher::{Blake3Hasher, Hasher, Sha256Hasher, Sha2Hasher, Sha384Hasher, Sha512Hasher};
pub use registry::{
    register_algorithm, register_algorithm_with_encoder, AlgorithmEntry, Charset, Encoder,
    HashFactory, Registry, RegistryConfig,
};
pub use verifier::Verifier;

/// Digest everything `reader` yields with [`Algorithm::CANONICAL`].
pub fn from_reader<R: Read>(reader: R) -> io::Result<Digest> {
    Algorithm::CANONICAL.from_reader(reader)
}

/// Digest `data` with [`Algorithm::CANONICAL`].
pub fn from_bytes(data: &[u8]) -> Digest {
    Algorithm::CANONICAL.from_bytes(data)
}

/// Digest the bytes of `text` with [`Algorithm::CANONICAL`].
pub fn from_string(text: &str) -> Digest {
    Algorithm::CANONICAL.from_string(text)
}
