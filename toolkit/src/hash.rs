//! # Hashing Utilities
//!
//! The two hash functions ethkit needs, and no more:
//!
//! - **SHA-256** — used as the message digest for signing. Yes, Ethereum
//!   tooling usually hashes with Keccak-256 behind an EIP-191 prefix; this
//!   tool has always hashed plain SHA-256 and existing signatures depend on
//!   it remaining that way. See [`crate::keys::PrivateKey::sign`].
//!
//! - **Keccak-256** — the original Keccak, not the FIPS-202 SHA3-256 variant
//!   (different padding byte, incompatible output). Used for address
//!   derivation and the EIP-55 checksum.

use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Compute the SHA-256 hash and return a fixed-size array.
///
/// # Example
///
/// ```
/// use ethkit::hash::sha256_array;
///
/// let digest = sha256_array(b"hello ethkit");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the Keccak-256 hash of the input data.
///
/// This is the hash that turns a public key into an Ethereum address and
/// that drives the mixed-case address checksum. `sha3::Keccak256` is the
/// pre-standardization Keccak that Ethereum froze into consensus; do not
/// swap it for `Sha3_256`, the outputs differ.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
