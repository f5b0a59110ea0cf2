//! Proptest generators for property-based testing.

use proptest::prelude::*;

use content_digest::{Algorithm, Digest, Registry};

/// Pattern for names that satisfy the algorithm grammar.
const VALID_NAME: &str = "[a-z0-9]{1,8}([.+_-][a-z0-9]{1,8}){0,3}";

/// Generate a well-formed algorithm name.
pub fn algorithm_name() -> impl Strategy<Value = String> {
    VALID_NAME.prop_map(String::from)
}

/// Generate a name that breaks the algorithm grammar.
pub fn invalid_algorithm_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        // leading or trailing separator
        (algorithm_name(), "[.+_-]").prop_map(|(name, sep)| format!("{sep}{name}")),
        (algorithm_name(), "[.+_-]").prop_map(|(name, sep)| format!("{name}{sep}")),
        // doubled separator
        (algorithm_name(), "[.+_-]{2}", algorithm_name())
            .prop_map(|(a, seps, b)| format!("{a}{seps}{b}")),
        // uppercase letter
        (algorithm_name(), "[A-Z]").prop_map(|(name, upper)| format!("{name}{upper}")),
        // character outside the grammar
        (algorithm_name(), "[*:/ @#]").prop_map(|(name, bad)| format!("{name}{bad}")),
    ]
}

/// Generate one of the algorithms registered in the process-wide registry.
pub fn registered_algorithm() -> impl Strategy<Value = Algorithm> {
    proptest::sample::select(Registry::global().algorithms())
}

/// Generate an encoded value from the generic grammar.
pub fn encoded(max_len: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[a-zA-Z0-9=_-]{{1,{max_len}}}"))
        .expect("valid encoded regex")
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a valid digest over random content with a registered algorithm.
pub fn valid_digest() -> impl Strategy<Value = (Digest, Vec<u8>)> {
    (registered_algorithm(), payload(512))
        .prop_map(|(algorithm, data)| (algorithm.from_bytes(&data), data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_digest::DigestError;

    proptest! {
        #[test]
        fn test_valid_names_register(name in algorithm_name()) {
            let registry = Registry::empty();
            prop_assert!(registry.register(name.as_str(), || Box::new(content_digest::Sha256Hasher::new()) as Box<dyn content_digest::Hasher>));
            prop_assert!(registry.available(&name));
        }

        #[test]
        fn test_invalid_names_panic(name in invalid_algorithm_name()) {
            let result = std::panic::catch_unwind(|| {
                Registry::empty().register(name.as_str(), || Box::new(content_digest::Sha256Hasher::new()) as Box<dyn content_digest::Hasher>);
            });
            prop_assert!(result.is_err(), "expected panic for {:?}", name);
        }

        #[test]
        fn test_valid_digests_validate((digest, _data) in valid_digest()) {
            prop_assert!(digest.validate().is_ok());
            prop_assert_eq!(Digest::parse(digest.as_str()), Ok(digest.clone()));
        }

        #[test]
        fn test_unregistered_well_formed_is_unsupported(
            name in algorithm_name(),
            value in encoded(64),
        ) {
            prop_assume!(!Registry::global().available(&name));
            let digest = Digest::from_encoded(&Algorithm::new(name), &value);
            prop_assert_eq!(digest.validate(), Err(DigestError::Unsupported));
        }

        #[test]
        fn test_unregistered_malformed_is_invalid_format(
            name in invalid_algorithm_name(),
            value in encoded(64),
        ) {
            prop_assume!(!name.contains(':'));
            let digest = Digest::from_encoded(&Algorithm::new(name), &value);
            prop_assert_eq!(digest.validate(), Err(DigestError::InvalidFormat));
        }
    }
}
