//! # content-digest testkit
//!
//! Testing utilities for `content-digest`.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with the exact digest text every built-in must produce
//! - **Generators**: Proptest strategies for algorithm names, encoded values and digests
//! - **Fixtures**: An isolated registry with a custom algorithm, plus tracing setup
//!
//! ## Golden Vectors
//!
//! ```rust
//! use content_digest_testkit::vectors::{all_vectors, digest_from_vector};
//!
//! for vector in all_vectors() {
//!     let digest = digest_from_vector(&vector);
//!     assert_eq!(digest.as_str(), vector.expected_digest);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use content_digest_testkit::generators::valid_digest;
//!
//! proptest! {
//!     #[test]
//!     fn digests_verify((digest, data) in valid_digest()) {
//!         let mut verifier = digest.verifier();
//!         verifier.write(&data);
//!         prop_assert!(verifier.verified());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use content_digest_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let digest = fixture.digest(&fixture.custom(), b"initial data");
//! assert!(fixture.registry.validate(&digest).is_ok());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{init_tracing, TestFixture, CUSTOM_ALGORITHM};
pub use generators::{algorithm_name, invalid_algorithm_name, valid_digest};
pub use vectors::{all_vectors, digest_from_vector, verify_all_vectors, GoldenVector};
