// Digest algorithm selection
// Closed set of supported algorithms and streaming hasher construction

use std::fmt;

use md5::Md5;
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use tiger::Tiger;
use whirlpool::Whirlpool;

use super::error::HashError;

/// Trait for streaming hash computation
pub trait Hasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the raw digest bytes
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Get the output size in bytes
    fn output_size(&self) -> usize;
}

// Bridges any RustCrypto digest type to the Hasher trait
struct DigestHasher<D: Digest + Send>(D);

impl<D: Digest + Send> Hasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.0).to_vec()
    }

    fn output_size(&self) -> usize {
        // Qualified: OutputSizeUser exposes an identically named function
        <D as Digest>::output_size()
    }
}

/// The supported digest algorithms
///
/// The set is closed: unknown identifiers are rejected at the boundary and
/// everything downstream matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Ripemd160,
    Whirlpool,
    Tiger,
}

impl HashAlgorithm {
    /// Every supported algorithm, in display order
    pub const ALL: [HashAlgorithm; 8] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Ripemd160,
        HashAlgorithm::Whirlpool,
        HashAlgorithm::Tiger,
    ];

    /// Resolve an algorithm identifier
    ///
    /// Accepts the command-line token ("sha256") and the dashed display form
    /// ("SHA-256"), case-insensitively. Anything else is an error; there is
    /// no fallback algorithm.
    pub fn from_token(name: &str) -> Result<Self, HashError> {
        let normalized = name.to_lowercase();

        match normalized.as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha384" | "sha-384" => Ok(HashAlgorithm::Sha384),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            "ripemd160" | "ripemd-160" => Ok(HashAlgorithm::Ripemd160),
            "whirlpool" => Ok(HashAlgorithm::Whirlpool),
            "tiger" => Ok(HashAlgorithm::Tiger),
            _ => Err(HashError::UnsupportedAlgorithm {
                name: name.to_string(),
            }),
        }
    }

    /// Human-readable algorithm name
    pub fn display_name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
            HashAlgorithm::Ripemd160 => "RIPEMD-160",
            HashAlgorithm::Whirlpool => "Whirlpool",
            HashAlgorithm::Tiger => "Tiger",
        }
    }

    /// Lowercase identifier used on the command line
    pub fn token(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Ripemd160 => "ripemd160",
            HashAlgorithm::Whirlpool => "whirlpool",
            HashAlgorithm::Tiger => "tiger",
        }
    }

    /// Digest length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
            HashAlgorithm::Ripemd160 => 20,
            HashAlgorithm::Whirlpool => 64,
            HashAlgorithm::Tiger => 24,
        }
    }

    /// Create a fresh streaming hasher for this algorithm
    pub fn hasher(&self) -> Box<dyn Hasher> {
        match self {
            HashAlgorithm::Md5 => Box::new(DigestHasher(Md5::new())),
            HashAlgorithm::Sha1 => Box::new(DigestHasher(Sha1::new())),
            HashAlgorithm::Sha256 => Box::new(DigestHasher(Sha256::new())),
            HashAlgorithm::Sha384 => Box::new(DigestHasher(Sha384::new())),
            HashAlgorithm::Sha512 => Box::new(DigestHasher(Sha512::new())),
            HashAlgorithm::Ripemd160 => Box::new(DigestHasher(Ripemd160::new())),
            HashAlgorithm::Whirlpool => Box::new(DigestHasher(Whirlpool::new())),
            HashAlgorithm::Tiger => Box::new(DigestHasher(Tiger::new())),
        }
    }

    /// List all supported algorithms
    pub fn list() -> Vec<AlgorithmInfo> {
        HashAlgorithm::ALL
            .iter()
            .map(|algorithm| AlgorithmInfo {
                name: algorithm.display_name().to_string(),
                token: algorithm.token().to_string(),
                output_bits: algorithm.digest_len() * 8,
            })
            .collect()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Information about a digest algorithm
#[derive(Debug, Clone, serde::Serialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub token: String,
    pub output_bits: usize,
}

// Tests live in tests/algorithm_tests.rs
