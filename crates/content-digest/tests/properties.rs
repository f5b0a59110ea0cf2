//! Property tests over every registered algorithm.

use content_digest::{Algorithm, Digest, DigestError, Hasher, Registry};
use proptest::prelude::*;

fn registered() -> impl Strategy<Value = Algorithm> {
    proptest::sample::select(Registry::global().algorithms())
}

proptest! {
    #[test]
    fn froms_agree(algorithm in registered(), data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let mut hasher = algorithm.hash();
        hasher.update(&data);
        let expected = format!("{}:{}", algorithm, hex::encode(hasher.finalize()));

        let from_bytes = algorithm.from_bytes(&data);
        let from_reader = algorithm.from_reader(&data[..]).unwrap();

        prop_assert_eq!(from_bytes.as_str(), expected.as_str());
        prop_assert_eq!(&from_reader, &from_bytes);
        prop_assert!(from_bytes.validate().is_ok());
    }

    #[test]
    fn from_string_matches_from_bytes(algorithm in registered(), text in ".{0,256}") {
        prop_assert_eq!(algorithm.from_string(&text), algorithm.from_bytes(text.as_bytes()));
    }

    #[test]
    fn from_encoded_roundtrip(
        name in "[a-z0-9]{1,8}([.+_-][a-z0-9]{1,8}){0,3}",
        encoded in "[a-zA-Z0-9=_-]{1,64}",
    ) {
        let algorithm = Algorithm::new(name.as_str());
        let digest = Digest::from_encoded(&algorithm, &encoded);
        prop_assert_eq!(digest.algorithm(), algorithm);
        prop_assert_eq!(digest.encoded(), encoded.as_str());
    }

    #[test]
    fn verifier_accepts_only_original(
        algorithm in registered(),
        data in prop::collection::vec(any::<u8>(), 0..1024),
        other in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let digest = algorithm.from_bytes(&data);

        let mut verifier = digest.verifier();
        verifier.write(&data);
        prop_assert!(verifier.verified());

        prop_assume!(other != data);
        let mut verifier = digest.verifier();
        verifier.write(&other);
        prop_assert!(!verifier.verified());
    }

    #[test]
    fn wrong_length_is_rejected(algorithm in registered(), len in 1usize..200) {
        let expected = Registry::global().lookup(algorithm.as_str()).unwrap().encoded_len();
        prop_assume!(len != expected);

        let digest = Digest::from_encoded(&algorithm, &"a".repeat(len));
        prop_assert_eq!(digest.validate(), Err(DigestError::InvalidLength));
    }

    #[test]
    fn validate_never_panics(text in ".{0,200}") {
        let _ = Digest::parse(text);
    }
}
