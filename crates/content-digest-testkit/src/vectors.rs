//! Golden test vectors for the built-in algorithms.
//!
//! These pin the exact digest text each algorithm must produce, so any
//! implementation reading or writing these identifiers can check itself.

use content_digest::{Algorithm, Digest};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Algorithm used to hash the input.
    pub algorithm: Algorithm,
    /// Input bytes.
    pub input: &'static [u8],
    /// Expected digest text.
    pub expected_digest: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "sha256 of empty input",
            algorithm: Algorithm::SHA256,
            input: b"",
            expected_digest:
                "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        GoldenVector {
            name: "sha256 of abc",
            algorithm: Algorithm::SHA256,
            input: b"abc",
            expected_digest:
                "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        GoldenVector {
            name: "sha256 of hello world",
            algorithm: Algorithm::SHA256,
            input: b"hello world",
            expected_digest:
                "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
        },
        GoldenVector {
            name: "sha384 of empty input",
            algorithm: Algorithm::SHA384,
            input: b"",
            expected_digest: "sha384:38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b",
        },
        GoldenVector {
            name: "sha384 of abc",
            algorithm: Algorithm::SHA384,
            input: b"abc",
            expected_digest: "sha384:cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
        },
        GoldenVector {
            name: "sha512 of empty input",
            algorithm: Algorithm::SHA512,
            input: b"",
            expected_digest: "sha512:cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        },
        GoldenVector {
            name: "sha512 of abc",
            algorithm: Algorithm::SHA512,
            input: b"abc",
            expected_digest: "sha512:ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        },
        GoldenVector {
            name: "blake3 of empty input",
            algorithm: Algorithm::BLAKE3,
            input: b"",
            expected_digest:
                "blake3:af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262",
        },
    ]
}

/// Compute the digest for a vector with the process-wide registry.
pub fn digest_from_vector(vector: &GoldenVector) -> Digest {
    vector.algorithm.from_bytes(vector.input)
}

/// Check every vector.
///
/// Returns `(name, matches, actual digest)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = digest_from_vector(v);
            let matches = actual.as_str() == v.expected_digest;
            (v.name.to_string(), matches, actual.into_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Digest as _;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "vector '{name}' produced {actual}");
        }
    }

    #[test]
    fn test_vectors_parse_and_verify() {
        for vector in all_vectors() {
            let digest = Digest::parse(vector.expected_digest)
                .unwrap_or_else(|e| panic!("vector '{}' does not parse: {e}", vector.name));
            assert_eq!(digest.algorithm(), vector.algorithm);

            let mut verifier = digest.verifier();
            verifier.write(vector.input);
            assert!(verifier.verified(), "vector '{}' failed to verify", vector.name);
        }
    }

    #[test]
    fn test_sha256_vectors_agree_with_sha2() {
        for vector in all_vectors()
            .into_iter()
            .filter(|v| v.algorithm == Algorithm::SHA256)
        {
            let direct = hex::encode(sha2::Sha256::digest(vector.input));
            assert_eq!(digest_from_vector(&vector).encoded(), direct);
        }
    }
}
