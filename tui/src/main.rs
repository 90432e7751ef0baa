// Copyright (c) 2026 ethkit contributors. MIT License.
// See LICENSE for details.

//! # ethkit Terminal Tool
//!
//! Entry point for the `ethkit` binary. Parses CLI arguments, initializes
//! logging and `.env` loading, then either runs one subcommand to
//! completion or drives the interactive menu loop.
//!
//! The menu loop is the only stateful piece, and even it is thin: it reads
//! stdin lines and ctrl-c into events, hands them to the pure transition
//! function in [`state`], interprets the returned effects (spawning the
//! Airstack lookup task, quitting), and prints the rendered screen. All
//! decisions live in `state`; all text lives in `view`.

mod cli;
mod logging;
mod state;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tokio::io::AsyncBufReadExt;
use tokio::signal;
use tokio::sync::mpsc;

use ethkit::airstack::AirstackClient;
use ethkit::keys::{generate_keypair, verify_signature, PrivateKey};

use cli::{Commands, EthkitCli};
use logging::LogFormat;
use state::{Effect, Event, Screen};

/// Capacity of the lookup-result channel. Only one lookup is ever in
/// flight, but a cancelled lookup may still deliver a late result, so
/// leave a little room rather than blocking the orphaned task.
const LOOKUP_CHANNEL_CAPACITY: usize = 4;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is a non-event; the API key is checked at the
    // moment a lookup actually runs.
    let _ = dotenv::dotenv();

    let cli = EthkitCli::parse();
    logging::init_logging(
        "ethkit_tui=info,ethkit=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        None | Some(Commands::Menu) => run_menu().await,
        Some(Commands::Convert(args)) => convert(&args),
        Some(Commands::Generate) => generate(),
        Some(Commands::Sign(args)) => sign(&args),
        Some(Commands::Verify(args)) => verify(&args),
        Some(Commands::Lookup(args)) => lookup(args).await,
    }
}

/// Drives the interactive menu until the user quits or stdin closes.
async fn run_menu() -> Result<()> {
    let api_key = std::env::var("AIRSTACK_API_KEY").unwrap_or_default();
    let client = AirstackClient::new(api_key);

    let mut screen = Screen::initial();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let (lookup_tx, mut lookup_rx) = mpsc::channel(LOOKUP_CHANNEL_CAPACITY);

    print_screen(&screen)?;
    loop {
        let event = tokio::select! {
            line = lines.next_line() => match line.context("failed to read stdin")? {
                Some(line) => Event::Line(line),
                // EOF: no further input can arrive, so a "back to menu"
                // would just hang. Leave quietly instead.
                None => break,
            },
            Some(result) = lookup_rx.recv() => Event::LookupFinished(result),
            _ = signal::ctrl_c() => Event::Cancel,
        };

        let (next, effect) = state::update(screen, event);
        screen = next;

        match effect {
            Some(Effect::Quit) => {
                print_screen(&screen)?;
                break;
            }
            Some(Effect::StartLookup(fname)) => {
                tracing::debug!(fname = %fname, "spawning Airstack lookup task");
                let client = client.clone();
                let tx = lookup_tx.clone();
                tokio::spawn(async move {
                    let result = client.query_account(&fname).await;
                    // The receiver may be gone if the loop already exited.
                    let _ = tx.send(result).await;
                });
            }
            None => {}
        }

        print_screen(&screen)?;
    }

    Ok(())
}

/// Print a rendered screen, separated from the previous one by a blank
/// line, and flush so prompts without trailing newlines appear.
fn print_screen(screen: &Screen) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "\n{}", view::render(screen)).context("failed to write to stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}

/// `convert` subcommand: private key hex in, checksummed address out.
fn convert(args: &cli::ConvertArgs) -> Result<()> {
    let key = PrivateKey::from_hex(args.key.trim())?;
    let address = key.address()?;
    println!("Ethereum Address: {address}");
    Ok(())
}

/// `generate` subcommand: fresh key pair to stdout.
fn generate() -> Result<()> {
    let (key, address) = generate_keypair()?;
    println!("New Private Key: {}", key.to_hex());
    println!("Corresponding Ethereum Address: {address}");
    println!();
    println!("WARNING: Store this private key securely. Never share it with anyone!");
    Ok(())
}

/// `sign` subcommand: recoverable signature over SHA-256 of the message.
fn sign(args: &cli::SignArgs) -> Result<()> {
    let key = PrivateKey::from_hex(args.key.trim())?;
    let signature = key.sign(args.message.as_bytes())?;
    println!("Signature:");
    println!("{signature}");
    Ok(())
}

/// `verify` subcommand. A signature that recovers to a different address
/// prints "invalid" and exits zero — that is a successful verification
/// with a negative answer. Only malformed inputs are errors.
fn verify(args: &cli::VerifyArgs) -> Result<()> {
    let valid = verify_signature(
        args.message.as_bytes(),
        args.signature.trim(),
        args.address.trim(),
    )?;
    if valid {
        println!("Signature is valid.");
    } else {
        println!("Signature is invalid.");
    }
    Ok(())
}

/// `lookup` subcommand: one-shot Farcaster profile query.
async fn lookup(args: cli::LookupArgs) -> Result<()> {
    let client = AirstackClient::new(args.api_key.unwrap_or_default());
    let username = args.username.trim();
    let account = client.query_account(username).await?;
    if account.is_empty() {
        println!("No data found for the provided Farcaster username.");
    } else {
        print!("{}", view::format_account(username, &account));
    }
    Ok(())
}
