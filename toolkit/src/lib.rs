// Copyright (c) 2026 ethkit contributors. MIT License.
// See LICENSE for details.

//! # ethkit — Core Library
//!
//! The working parts behind the `ethkit` terminal tool: Ethereum key
//! material handling and a Farcaster profile lookup. The binary crate owns
//! every prompt, screen, and log line; this crate owns the math and the
//! one network call.
//!
//! ## Modules
//!
//! - **keys** — private keys, address derivation, recoverable ECDSA
//!   signing and verification. Pure, synchronous, side-effect-free apart
//!   from drawing entropy during generation.
//! - **hash** — SHA-256 and Keccak-256 wrappers. Two functions, zero
//!   cleverness.
//! - **airstack** — async client for the Airstack GraphQL API (Farcaster
//!   profiles and casts).
//!
//! ## Design rules
//!
//! 1. The core never logs, never retries, never exits the process. Every
//!    failure is a typed error handed back to the caller.
//! 2. Key material is a value object: parsed, used once, dropped. Nothing
//!    here persists anything.
//! 3. Anything that touches money-adjacent crypto has a fixed test vector.

pub mod airstack;
pub mod hash;
pub mod keys;

// Re-export the things people actually need so they don't have to memorize
// the module hierarchy.
pub use airstack::{AirstackClient, FarcasterAccount, LookupError};
pub use keys::{
    generate_keypair, verify_signature, Address, KeyError, PrivateKey, RecoverableSignature,
};
