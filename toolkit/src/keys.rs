//! # Key Material
//!
//! secp256k1 private keys, derived Ethereum addresses, and recoverable
//! ECDSA signatures. Everything in this module is a value object: parsed,
//! used for one operation, dropped. Nothing is persisted and nothing is
//! mutated after construction.
//!
//! ## Validation happens in two layers
//!
//! A [`PrivateKey`] is *syntactically* valid the moment it exists: exactly
//! 64 hex characters, nothing else. Whether those 32 bytes are a usable
//! scalar on the curve (nonzero, below the group order) is checked by the
//! operations that actually touch the curve — [`PrivateKey::address`] and
//! [`PrivateKey::sign`] — and reported as [`KeyError::InvalidKey`]. Keeping
//! the two layers separate means "you typed 63 characters" and "you typed
//! the curve order" produce different, honest errors.
//!
//! ## The SHA-256 digest
//!
//! Messages are hashed with **SHA-256** before signing, not with the
//! Keccak-256 + `"\x19Ethereum Signed Message:\n"` prefix that wallets use.
//! That choice is historical and load-bearing: signatures produced by
//! earlier releases of this tool hash SHA-256, and verification must keep
//! accepting them. Do not "fix" this to EIP-191 — you would orphan every
//! signature ever produced here. The tests pin the behavior on purpose.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS CSPRNG (`OsRng`) and rejection-samples
//!   until the bytes form a valid scalar.
//! - Private key bytes are never logged and never appear in `Debug` output.
//! - Signing uses RFC 6979 deterministic nonces via `k256`. No RNG at
//!   signing time, no nonce-reuse disasters.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand_core::RngCore;
use std::fmt;
use thiserror::Error;

use crate::hash::{keccak256, sha256_array};

/// Errors from key-material operations.
///
/// Every variant is recoverable: the caller (CLI subcommand or menu screen)
/// shows the message and returns to a retry point. Nothing here terminates
/// the process, and the messages deliberately say nothing about the key
/// bytes themselves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("private key cannot be empty")]
    EmptyInput,

    #[error("private key must be 64 hex characters, got {actual}")]
    InvalidLength { actual: usize },

    #[error("private key contains non-hexadecimal characters")]
    InvalidHex,

    #[error("private key is not a valid secp256k1 scalar")]
    InvalidKey,

    #[error("invalid Ethereum address")]
    InvalidAddress,

    #[error("signature must decode to exactly 65 bytes")]
    InvalidSignatureFormat,

    #[error("could not recover a public key from the signature")]
    RecoveryFailure,

    #[error("entropy source failure during key generation")]
    GenerationFailure,
}

/// A secp256k1 private key: 32 bytes of pure responsibility.
///
/// Construct one by parsing user-supplied hex ([`PrivateKey::from_hex`]) or
/// by drawing fresh randomness ([`PrivateKey::generate`]). The bytes are
/// guaranteed to be well-formed hex-decoded material; curve validity is
/// checked lazily by the operations that need it.
///
/// `PrivateKey` intentionally does NOT implement `Serialize`, `Clone`-into-
/// logs helpers, or `Display`. Exporting secret material is a deliberate
/// act — call [`to_hex`](Self::to_hex) and own the consequences.
///
/// # Examples
///
/// ```
/// use ethkit::keys::PrivateKey;
///
/// let key = PrivateKey::from_hex(
///     "0000000000000000000000000000000000000000000000000000000000000001",
/// ).unwrap();
/// assert_eq!(
///     key.address().unwrap().to_string(),
///     "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf",
/// );
/// ```
pub struct PrivateKey {
    bytes: [u8; 32],
}

/// A 20-byte Ethereum address.
///
/// Derived one-way from a public key: Keccak-256 of the uncompressed point
/// (minus the `0x04` prefix byte), last 20 bytes. Equality is plain byte
/// equality; the mixed-case checksum exists only in the rendered form, so
/// `0xABCD…` and `0xabcd…` parse to equal addresses.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; 20],
}

/// A recoverable ECDSA signature: 32-byte `r`, 32-byte `s`, 1-byte
/// recovery id. 65 bytes, no exceptions.
///
/// The recovery id is what lets verification work without ever seeing the
/// public key — the verifier recovers it from the signature and digest,
/// derives an address, and compares. Anything that does not decode to
/// exactly 65 bytes is rejected before any curve math runs.
#[derive(Clone, PartialEq, Eq)]
pub struct RecoverableSignature {
    bytes: [u8; 65],
}

impl PrivateKey {
    /// Parse a 64-hex-character private key string.
    ///
    /// Validation is purely syntactic and runs in order: empty input,
    /// wrong length, non-hex characters. A string that passes all three
    /// always decodes to 32 bytes. Curve-level validity (nonzero, below
    /// the group order) is *not* checked here — see the module docs.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        if hex_str.is_empty() {
            return Err(KeyError::EmptyInput);
        }
        if hex_str.len() != 64 {
            return Err(KeyError::InvalidLength {
                actual: hex_str.len(),
            });
        }
        if !hex_str.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(KeyError::InvalidHex);
        }
        let decoded = hex::decode(hex_str).map_err(|_| KeyError::InvalidHex)?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// Generate a fresh private key from the OS cryptographic RNG.
    ///
    /// Draws 32 bytes and rejection-samples until they form a scalar in
    /// `[1, n-1]` — the zero scalar and out-of-range values are rejected by
    /// the curve library, and we simply draw again. The loop runs more than
    /// once with probability ~2^-128, so "loop" is generous.
    ///
    /// Fails with [`KeyError::GenerationFailure`] only if the entropy
    /// source itself fails, which on any sane OS means the machine has
    /// bigger problems than key generation.
    pub fn generate() -> Result<Self, KeyError> {
        let mut bytes = [0u8; 32];
        loop {
            OsRng
                .try_fill_bytes(&mut bytes)
                .map_err(|_| KeyError::GenerationFailure)?;
            if SigningKey::from_bytes(&bytes.into()).is_ok() {
                return Ok(Self { bytes });
            }
        }
    }

    /// Derive the Ethereum address for this key.
    ///
    /// Scalar-multiplies the curve generator to get the public key, hashes
    /// the uncompressed point (without its `0x04` prefix byte) with
    /// Keccak-256, and keeps the last 20 bytes. Deterministic: the same key
    /// always yields the same address.
    pub fn address(&self) -> Result<Address, KeyError> {
        let signing_key = self.signing_key()?;
        Ok(Address::from_verifying_key(signing_key.verifying_key()))
    }

    /// Sign a message with this key, returning a 65-byte recoverable
    /// signature.
    ///
    /// The message is hashed with **SHA-256** (see the module docs for why
    /// this is not EIP-191 and must stay that way), and the 32-byte digest
    /// is signed with deterministic-nonce ECDSA. The recovery id is
    /// appended as the 65th byte so verifiers can recover the public key.
    pub fn sign(&self, message: &[u8]) -> Result<RecoverableSignature, KeyError> {
        let signing_key = self.signing_key()?;
        let digest = sha256_array(message);
        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(&digest)
            .map_err(|_| KeyError::InvalidKey)?;

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(signature.to_bytes().as_slice());
        bytes[64] = recovery_id.to_byte();
        Ok(RecoverableSignature { bytes })
    }

    /// Lowercase hex rendering of the secret key — 64 characters, no `0x`.
    ///
    /// **Handle with extreme care.** This string *is* the key. Don't log
    /// it, don't paste it into a chat window, don't commit it to git.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse the raw bytes onto the curve, or fail with `InvalidKey`.
    fn signing_key(&self) -> Result<SigningKey, KeyError> {
        SigningKey::from_bytes(&self.bytes.into()).map_err(|_| KeyError::InvalidKey)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material in debug output. Not even "partially."
        match self.address() {
            Ok(addr) => write!(f, "PrivateKey(address={})", addr),
            Err(_) => write!(f, "PrivateKey(<invalid scalar>)"),
        }
    }
}

/// Generate a fresh key pair: a private key and its derived address.
///
/// Convenience wrapper for the common "give me a new identity" flow. The
/// address derivation cannot fail for a freshly generated key, but the
/// signature stays honest about the entropy source.
pub fn generate_keypair() -> Result<(PrivateKey, Address), KeyError> {
    let key = PrivateKey::generate()?;
    let address = key.address()?;
    Ok((key, address))
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

impl Address {
    /// Parse a hex address string: optional `0x` prefix, then exactly 40
    /// hex characters, case-insensitive.
    ///
    /// The EIP-55 checksum casing is *not* enforced on input — an
    /// all-lowercase or all-uppercase address parses fine, matching how
    /// every wallet and explorer treats pasted addresses.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(KeyError::InvalidAddress);
        }
        let decoded = hex::decode(digits).map_err(|_| KeyError::InvalidAddress)?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// Derive the address for a public key: Keccak-256 of the uncompressed
    /// SEC1 point without its prefix byte, last 20 bytes.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let digest = keccak256(&point.as_bytes()[1..]);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Self { bytes }
    }

    /// The raw 20 address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    /// Render with the EIP-55 mixed-case checksum.
    ///
    /// The casing of each hex letter encodes one bit of the Keccak-256 hash
    /// of the lowercase address, which is how a wallet can catch a typo'd
    /// address without any network round trip. `Display` delegates here, so
    /// `to_string()` is always checksum-cased.
    pub fn to_checksum_hex(&self) -> String {
        let lower = hex::encode(self.bytes);
        let digest = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                digest[i / 2] >> 4
            } else {
                digest[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum_hex())
    }
}

// ---------------------------------------------------------------------------
// RecoverableSignature
// ---------------------------------------------------------------------------

impl RecoverableSignature {
    /// Parse a hex-encoded signature: optional `0x` prefix, then exactly
    /// 130 hex characters decoding to 65 bytes.
    ///
    /// The length check runs before any cryptography — a 64-byte or
    /// 66-byte blob is a format error, full stop, and never reaches the
    /// recovery math.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(digits).map_err(|_| KeyError::InvalidSignatureFormat)?;
        if decoded.len() != 65 {
            return Err(KeyError::InvalidSignatureFormat);
        }
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// The raw 65 signature bytes: `r ‖ s ‖ v`.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.bytes
    }

    /// Hex rendering with a `0x` prefix — 132 characters total. This is
    /// the form the signing flow prints and the verify flow accepts back.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Recover the signer's address for a given message.
    ///
    /// Recomputes the SHA-256 digest, splits off `r ‖ s` and the recovery
    /// id, and asks the curve library which public key produced the
    /// signature. Fails with [`KeyError::RecoveryFailure`] when the math
    /// says no key could have — malformed `r`/`s`, an out-of-range
    /// recovery id, or a digest/signature pair that recovers to nothing.
    pub fn recover_address(&self, message: &[u8]) -> Result<Address, KeyError> {
        let digest = sha256_array(message);
        let signature = EcdsaSignature::from_slice(&self.bytes[..64])
            .map_err(|_| KeyError::RecoveryFailure)?;
        let recovery_id =
            RecoveryId::from_byte(self.bytes[64]).ok_or(KeyError::RecoveryFailure)?;
        let verifying_key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
            .map_err(|_| KeyError::RecoveryFailure)?;
        Ok(Address::from_verifying_key(&verifying_key))
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "RecoverableSignature({}...{})", &hex_str[..10], &hex_str[126..])
    }
}

/// Verify a signature against a claimed signer address.
///
/// Takes the message bytes plus the *user-supplied strings* for the
/// signature and address, because that is what the CLI and menu flows hold.
/// The pipeline is: parse the address (`InvalidAddress`), parse the
/// signature (`InvalidSignatureFormat`, including the 65-byte length
/// check), recover the signer's address (`RecoveryFailure`), compare.
///
/// The distinction in the return value matters and must not be collapsed:
/// a signature that *recovers to the wrong address* is a valid computation
/// with the answer `Ok(false)`; a signature that *cannot be recovered at
/// all* is `Err(RecoveryFailure)`. "Forged" and "garbage" are different
/// findings.
pub fn verify_signature(
    message: &[u8],
    signature_hex: &str,
    claimed_address: &str,
) -> Result<bool, KeyError> {
    let claimed = Address::from_hex(claimed_address)?;
    let signature = RecoverableSignature::from_hex(signature_hex)?;
    let recovered = signature.recover_address(message)?;
    Ok(recovered == claimed)
}
