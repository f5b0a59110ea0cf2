//! Registration against the process-wide registry.

use std::io;

use content_digest::{
    register_algorithm, register_algorithm_with_encoder, Algorithm, Digest, DigestError, Hasher,
    Sha256Hasher, Sha512Hasher,
};

fn sha256() -> Box<dyn Hasher> {
    Box::new(Sha256Hasher::new())
}

#[test]
fn test_register_custom_algorithm_globally() {
    assert!(!Algorithm::new("sha256-test").available());
    register_algorithm("sha256-test", sha256);
    let algorithm = Algorithm::new("sha256-test");
    assert!(algorithm.available());

    let digest = algorithm.from_string("hello world");
    assert_eq!(
        digest.as_str(),
        "sha256-test:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
    assert!(Digest::parse(digest.as_str()).is_ok());
    assert_eq!("sha256-test".parse::<Algorithm>(), Ok(algorithm));
}

#[test]
fn test_register_with_encoder_globally() {
    register_algorithm_with_encoder(
        "sha512.trunc",
        || Box::new(Sha512Hasher::new()) as Box<dyn Hasher>,
        |raw: &[u8]| hex::encode(&raw[..16]),
        32,
    );

    let digest = Algorithm::new("sha512.trunc").from_bytes(b"abc");
    assert_eq!(digest.encoded(), "ddaf35a193617abacc417349ae204131");
    assert!(digest.validate().is_ok());
    assert_eq!(
        Digest::parse("sha512.trunc:ddaf35a193617aba"),
        Err(DigestError::InvalidLength)
    );
}

#[test]
#[should_panic(expected = "invalid algorithm name")]
fn test_register_uppercase_panics() {
    register_algorithm("SHA256", sha256);
}

#[test]
#[should_panic(expected = "invalid algorithm name")]
fn test_register_wildcard_panics() {
    register_algorithm("sha25*", sha256);
}

#[test]
#[should_panic(expected = "invalid algorithm name")]
fn test_register_bare_separator_panics() {
    register_algorithm("-", sha256);
}

#[test]
fn test_canonical_helpers() {
    let data = b"canonical content";
    let expected = Algorithm::SHA256.from_bytes(data);

    assert_eq!(content_digest::from_bytes(data), expected);
    assert_eq!(content_digest::from_string("canonical content"), expected);
    assert_eq!(content_digest::from_reader(io::Cursor::new(data)).unwrap(), expected);
}

#[test]
fn test_unknown_algorithm_validation() {
    assert_eq!(Digest::parse("bogus:abcdef"), Err(DigestError::Unsupported));
    assert_eq!(Digest::parse("sha256"), Err(DigestError::InvalidFormat));
    assert_eq!(
        Digest::parse(format!("sha256:{}", "a".repeat(63))),
        Err(DigestError::InvalidLength)
    );
    assert!(Digest::parse(format!("sha256:{}", "a".repeat(64))).is_ok());
}
