//! Error types for digest validation.

use thiserror::Error;

/// Errors returned when a digest string or encoded value fails validation.
///
/// The variants are plain values so callers can compare against them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DigestError {
    /// Missing separator, empty component, or a string outside the digest grammar.
    #[error("invalid checksum digest format")]
    InvalidFormat,

    /// The encoded portion does not have the length the algorithm requires.
    #[error("invalid checksum digest length")]
    InvalidLength,

    /// The algorithm is well formed but not registered.
    #[error("unsupported digest algorithm")]
    Unsupported,
}

/// Result type for digest validation.
pub type Result<T> = std::result::Result<T, DigestError>;
