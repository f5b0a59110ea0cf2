//! Streaming verification of content against an expected digest.

use std::fmt;
use std::io::{self, Write};

use crate::digest::Digest;
use crate::hasher::Hasher;
use crate::registry::Encoder;

/// Checks that a stream of bytes hashes to an expected [`Digest`].
///
/// Write the content with [`Verifier::write`] (or through [`std::io::Write`]),
/// then call [`Verifier::verified`] once. `verified` consumes the verifier, so
/// writing after finalization or finalizing twice is rejected at compile time:
///
/// ```compile_fail
/// use content_digest::Algorithm;
///
/// let digest = Algorithm::SHA256.from_bytes(b"content");
/// let mut verifier = digest.verifier();
/// verifier.write(b"content");
/// assert!(verifier.verified());
/// verifier.write(b"more"); // use of moved value
/// ```
pub struct Verifier {
    digest: Digest,
    hasher: Box<dyn Hasher>,
    encoder: Encoder,
    written: u64,
}

impl Verifier {
    pub(crate) fn new(digest: Digest, hasher: Box<dyn Hasher>, encoder: Encoder) -> Self {
        Self {
            digest,
            hasher,
            encoder,
            written: 0,
        }
    }

    /// The digest the content is checked against.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Feed content into the running hash. Always accepts every byte.
    pub fn write(&mut self, data: &[u8]) -> usize {
        self.hasher.update(data);
        self.written += data.len() as u64;
        data.len()
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Finish hashing and report whether the content matches the digest.
    pub fn verified(self) -> bool {
        let Verifier {
            digest,
            hasher,
            encoder,
            written,
        } = self;

        let actual = encoder(&hasher.finalize());
        let matched = actual.as_bytes() == digest.encoded().as_bytes();
        if !matched {
            tracing::debug!(
                "Content of {} bytes does not match {}: got {}",
                written,
                digest,
                actual
            );
        }
        matched
    }
}

impl Write for Verifier {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Verifier::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("digest", &self.digest)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;

    #[test]
    fn test_verifier_matches_same_content() {
        let digest = Algorithm::SHA256.from_bytes(b"hello world");
        let mut verifier = digest.verifier();
        assert_eq!(verifier.write(b"hello "), 6);
        assert_eq!(verifier.write(b"world"), 5);
        assert_eq!(verifier.written(), 11);
        assert!(verifier.verified());
    }

    #[test]
    fn test_verifier_rejects_different_content() {
        let digest = Algorithm::SHA256.from_bytes(b"hello world");

        let mut verifier = digest.verifier();
        verifier.write(b"hello World");
        assert!(!verifier.verified());

        let mut verifier = digest.verifier();
        verifier.write(b"hello world!");
        assert!(!verifier.verified());

        assert!(!digest.verifier().verified());
    }

    #[test]
    fn test_verifier_empty_content() {
        let digest = Algorithm::SHA512.from_bytes(b"");
        assert!(digest.verifier().verified());
    }

    #[test]
    fn test_verifier_as_io_write() {
        let data = vec![7u8; 100_000];
        let digest = Algorithm::BLAKE3.from_bytes(&data);

        let mut verifier = digest.verifier();
        io::copy(&mut &data[..], &mut verifier).unwrap();
        assert_eq!(verifier.written(), 100_000);
        assert_eq!(verifier.digest(), &digest);
        assert!(verifier.verified());
    }

    #[test]
    fn test_verifier_rejects_wrong_length_digest() {
        let digest = Digest::from_encoded(&Algorithm::SHA256, "abcd");
        let mut verifier = digest.verifier();
        verifier.write(b"anything");
        assert!(!verifier.verified());
    }
}
