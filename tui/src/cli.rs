//! # CLI Interface
//!
//! Defines the command-line argument structure for `ethkit` using `clap`
//! derive. Run with no subcommand (or `menu`) for the interactive terminal
//! menu; every menu operation is also available as a one-shot subcommand
//! for scripting.

use clap::{Parser, Subcommand};

/// ethkit — Ethereum key utilities.
///
/// Convert private keys to addresses, generate key pairs, sign and verify
/// messages, and look up Farcaster profiles via Airstack. Without a
/// subcommand, opens the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "ethkit", about = "Ethereum key utilities", version)]
pub struct EthkitCli {
    /// Subcommand to execute; defaults to the interactive menu.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log output format: "pretty" or "json".
    #[arg(long, global = true, env = "ETHKIT_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

/// Top-level subcommands for the ethkit binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive terminal menu (the default).
    Menu,
    /// Convert a hex private key to its checksummed Ethereum address.
    Convert(ConvertArgs),
    /// Generate a new private key and print it with its address.
    Generate,
    /// Sign a message with a private key (SHA-256 digest, recoverable ECDSA).
    Sign(SignArgs),
    /// Verify a signature against a claimed signer address.
    Verify(VerifyArgs),
    /// Look up a Farcaster profile and recent casts via Airstack.
    Lookup(LookupArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// The private key as 64 hex characters.
    pub key: String,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// The private key as 64 hex characters.
    ///
    /// **Never pass real keys on shared machines** — your shell history
    /// and the process table both see this argument.
    pub key: String,

    /// The message to sign, taken verbatim.
    pub message: String,
}

/// Arguments for the `verify` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// The message that was signed.
    pub message: String,

    /// The 65-byte signature as hex (with or without a 0x prefix).
    pub signature: String,

    /// The claimed signer address (checksum casing not required).
    pub address: String,
}

/// Arguments for the `lookup` subcommand.
#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// The Farcaster username to look up.
    pub username: String,

    /// Airstack API key. Usually supplied via the environment or a `.env`
    /// file rather than the command line.
    #[arg(long, env = "AIRSTACK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
