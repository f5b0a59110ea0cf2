//! Streaming hash objects.
//!
//! The registry never depends on a concrete hash library. It stores
//! constructors that produce a boxed [`Hasher`], and the SHA-2 and Blake3
//! wrappers here are the ones registered by default.

use std::fmt;

/// A streaming hash computation.
///
/// `finalize` consumes the hasher, so a finished computation cannot be fed
/// more data.
pub trait Hasher: Send {
    /// Absorb `data` into the running hash.
    fn update(&mut self, data: &[u8]);

    /// Finish the computation and return the raw hash bytes.
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Any SHA-2 family hasher from the `sha2` crate.
pub struct Sha2Hasher<D>(D);

/// SHA-256 (32-byte output).
pub type Sha256Hasher = Sha2Hasher<sha2::Sha256>;

/// SHA-384 (48-byte output).
pub type Sha384Hasher = Sha2Hasher<sha2::Sha384>;

/// SHA-512 (64-byte output).
pub type Sha512Hasher = Sha2Hasher<sha2::Sha512>;

impl<D: sha2::Digest> Sha2Hasher<D> {
    /// Create a fresh hasher.
    pub fn new() -> Self {
        Self(D::new())
    }
}

impl<D: sha2::Digest> Default for Sha2Hasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: sha2::Digest + Send> Hasher for Sha2Hasher<D> {
    fn update(&mut self, data: &[u8]) {
        sha2::Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        sha2::Digest::finalize(self.0).to_vec()
    }
}

impl<D> fmt::Debug for Sha2Hasher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sha2Hasher(..)")
    }
}

/// Blake3 with its default 32-byte output.
#[derive(Default)]
pub struct Blake3Hasher(blake3::Hasher);

impl Blake3Hasher {
    /// Create a fresh hasher.
    pub fn new() -> Self {
        Self(blake3::Hasher::new())
    }
}

impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }
}

impl fmt::Debug for Blake3Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Blake3Hasher(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_with(mut hasher: Box<dyn Hasher>, data: &[u8]) -> String {
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    #[test]
    fn test_sha256_hasher() {
        assert_eq!(
            hash_with(Box::new(Sha256Hasher::new()), b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha2_output_sizes() {
        assert_eq!(Box::new(Sha256Hasher::new()).finalize().len(), 32);
        assert_eq!(Box::new(Sha384Hasher::new()).finalize().len(), 48);
        assert_eq!(Box::new(Sha512Hasher::new()).finalize().len(), 64);
    }

    #[test]
    fn test_blake3_hasher() {
        assert_eq!(
            hash_with(Box::new(Blake3Hasher::new()), b""),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_incremental_update_matches_one_shot() {
        let mut split: Box<dyn Hasher> = Box::new(Sha512Hasher::new());
        split.update(b"hello ");
        split.update(b"world");

        let whole = hash_with(Box::new(Sha512Hasher::new()), b"hello world");
        assert_eq!(hex::encode(split.finalize()), whole);
    }
}
