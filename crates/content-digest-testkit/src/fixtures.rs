//! Test fixtures and helpers.
//!
//! Common setup code for tests that need an isolated registry.

use content_digest::{Algorithm, Digest, Hasher, Registry, RegistryConfig, Sha256Hasher};

/// Name of the custom algorithm every fixture registers.
pub const CUSTOM_ALGORITHM: &str = "sha256.b64url";

/// A test fixture owning a private registry.
///
/// Nothing registered here leaks into [`Registry::global`].
pub struct TestFixture {
    pub registry: Registry,
}

impl TestFixture {
    /// A fixture with the built-ins plus [`CUSTOM_ALGORITHM`].
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// A fixture whose registry refuses duplicate registrations.
    pub fn strict() -> Self {
        Self::with_config(RegistryConfig {
            replace_existing: false,
            ..RegistryConfig::default()
        })
    }

    fn with_config(config: RegistryConfig) -> Self {
        let registry = Registry::with_config(config);
        registry.register_with_encoder(CUSTOM_ALGORITHM, sha256, base64url, 43);
        Self { registry }
    }

    /// The custom algorithm.
    pub fn custom(&self) -> Algorithm {
        Algorithm::new(CUSTOM_ALGORITHM)
    }

    /// Digest `data` with `algorithm` in this fixture's registry.
    pub fn digest(&self, algorithm: &Algorithm, data: &[u8]) -> Digest {
        self.registry.digest_bytes(algorithm, data)
    }

    /// Stream `data` through a verifier for `digest` in `chunk`-sized writes.
    pub fn verify_chunked(&self, digest: &Digest, data: &[u8], chunk: usize) -> bool {
        let mut verifier = self.registry.verifier(digest);
        for piece in data.chunks(chunk.max(1)) {
            verifier.write(piece);
        }
        verifier.verified()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn sha256() -> Box<dyn Hasher> {
    Box::new(Sha256Hasher::new())
}

// RFC 4648 base64url encoding, no padding
fn base64url(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
    let mut result = String::with_capacity((data.len() * 4 + 2) / 3);
    let mut buffer: u32 = 0;
    let mut bits_in_buffer = 0;

    for &byte in data {
        buffer = (buffer << 8) | (byte as u32);
        bits_in_buffer += 8;

        while bits_in_buffer >= 6 {
            bits_in_buffer -= 6;
            let index = ((buffer >> bits_in_buffer) & 0x3f) as usize;
            result.push(ALPHABET[index] as char);
        }
    }

    if bits_in_buffer > 0 {
        let index = ((buffer << (6 - bits_in_buffer)) & 0x3f) as usize;
        result.push(ALPHABET[index] as char);
    }

    result
}
