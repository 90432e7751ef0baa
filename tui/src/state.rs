//! # Menu State Machine
//!
//! The interactive menu as a pure transition function: `update(Screen,
//! Event) -> (Screen, Option<Effect>)`. Each screen is its own variant
//! carrying exactly the fields that screen needs — the multi-step sign and
//! verify flows thread their collected inputs through their variants
//! instead of sharing a grab-bag of reusable string slots.
//!
//! Nothing in this module performs I/O. The runtime loop in `main.rs`
//! reads stdin lines and ctrl-c into [`Event`]s, interprets the returned
//! [`Effect`]s (spawning the Airstack lookup task, quitting), and renders
//! the resulting screen with [`crate::view::render`]. The network result
//! comes back as its own typed event, [`Event::LookupFinished`], carrying
//! `Result<FarcasterAccount, LookupError>` — success and failure never
//! share a representation.
//!
//! Key generation happens inside `update` (selecting the menu entry *is*
//! the whole interaction); it consumes entropy but still performs no I/O
//! and suspends on nothing.

use ethkit::airstack::{FarcasterAccount, LookupError};
use ethkit::keys::{generate_keypair, verify_signature, PrivateKey};

use crate::view::format_account;

/// The current screen, as a tagged union of per-screen states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The top-level menu. `notice` shows feedback for an unrecognized
    /// selection.
    Menu { notice: Option<String> },
    /// Prompting for a private key to convert to an address.
    Convert { notice: Option<String> },
    /// Prompting for a Farcaster username to look up.
    Farcaster { notice: Option<String> },
    /// A lookup for `fname` is in flight; waiting for its result event.
    AwaitingLookup { fname: String },
    /// Sign flow, step 1: prompting for the private key.
    SignKey { notice: Option<String> },
    /// Sign flow, step 2: key accepted, prompting for the message.
    SignMessage { key_hex: String, notice: Option<String> },
    /// Verify flow, step 1: prompting for the signed message.
    VerifyMessage { notice: Option<String> },
    /// Verify flow, step 2: prompting for the signature.
    VerifySignature { message: String, notice: Option<String> },
    /// Verify flow, step 3: prompting for the claimed signer address.
    VerifyAddress {
        message: String,
        signature: String,
        notice: Option<String>,
    },
    /// Showing a result; any input returns to the menu.
    Display { content: String },
    /// Terminal state. The runtime loop exits when it sees this.
    Done,
}

impl Screen {
    /// The screen the program starts on.
    pub fn initial() -> Self {
        Screen::Menu { notice: None }
    }
}

/// An input the state machine reacts to.
#[derive(Debug)]
pub enum Event {
    /// One submitted line from the terminal, newline stripped.
    Line(String),
    /// Ctrl-C: abandon the current screen (quit when already at the menu).
    Cancel,
    /// The spawned Airstack lookup finished, successfully or not.
    LookupFinished(Result<FarcasterAccount, LookupError>),
}

/// A side effect the runtime loop must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Spawn a lookup task for this username and deliver its result as
    /// [`Event::LookupFinished`].
    StartLookup(String),
    /// Stop the program.
    Quit,
}

/// Advance the state machine by one event.
pub fn update(screen: Screen, event: Event) -> (Screen, Option<Effect>) {
    match (screen, event) {
        // Ctrl-C: quit from the menu, otherwise abandon the screen. An
        // in-flight lookup is simply orphaned; its late result event will
        // find no AwaitingLookup screen and be ignored.
        (Screen::Menu { .. }, Event::Cancel) | (Screen::Done, Event::Cancel) => {
            (Screen::Done, Some(Effect::Quit))
        }
        (_, Event::Cancel) => (Screen::Menu { notice: None }, None),

        (Screen::Menu { .. }, Event::Line(line)) => menu_select(line.trim()),

        (Screen::Convert { .. }, Event::Line(line)) => convert_key(line.trim()),

        (Screen::Farcaster { .. }, Event::Line(line)) => {
            let fname = line.trim().to_string();
            if fname.is_empty() {
                let notice = Some("Error: Farcaster username cannot be empty.".to_string());
                (Screen::Farcaster { notice }, None)
            } else {
                let effect = Effect::StartLookup(fname.clone());
                (Screen::AwaitingLookup { fname }, Some(effect))
            }
        }

        (Screen::AwaitingLookup { fname }, Event::LookupFinished(result)) => {
            let content = match result {
                Ok(account) if account.is_empty() => {
                    "No data found for the provided Farcaster username.".to_string()
                }
                Ok(account) => format_account(&fname, &account),
                Err(err) => format!("Error querying Airstack API: {err}"),
            };
            (Screen::Display { content }, None)
        }
        // Keystrokes while the lookup is in flight change nothing.
        (screen @ Screen::AwaitingLookup { .. }, Event::Line(_)) => (screen, None),

        (Screen::SignKey { .. }, Event::Line(line)) => sign_accept_key(line.trim()),

        (Screen::SignMessage { key_hex, .. }, Event::Line(message)) => {
            sign_accept_message(key_hex, &message)
        }

        (Screen::VerifyMessage { .. }, Event::Line(message)) => {
            if message.is_empty() {
                let notice = Some("Error: Message cannot be empty.".to_string());
                (Screen::VerifyMessage { notice }, None)
            } else {
                (Screen::VerifySignature { message, notice: None }, None)
            }
        }

        (Screen::VerifySignature { message, .. }, Event::Line(line)) => {
            let signature = line.trim().to_string();
            if signature.is_empty() {
                let notice = Some("Error: Signature cannot be empty.".to_string());
                (Screen::VerifySignature { message, notice }, None)
            } else {
                (
                    Screen::VerifyAddress {
                        message,
                        signature,
                        notice: None,
                    },
                    None,
                )
            }
        }

        (Screen::VerifyAddress { message, signature, .. }, Event::Line(line)) => {
            verify_accept_address(message, signature, line.trim())
        }

        (Screen::Display { .. }, Event::Line(_)) => (Screen::Menu { notice: None }, None),

        // Late or misdelivered events leave the screen untouched.
        (screen, _) => (screen, None),
    }
}

/// Handle a menu selection line.
fn menu_select(choice: &str) -> (Screen, Option<Effect>) {
    match choice {
        "1" => (Screen::Convert { notice: None }, None),
        "2" => (generate_screen(), None),
        "3" => (Screen::Farcaster { notice: None }, None),
        "4" => (Screen::SignKey { notice: None }, None),
        "5" => (Screen::VerifyMessage { notice: None }, None),
        "6" | "q" | "quit" => (Screen::Done, Some(Effect::Quit)),
        other => {
            let notice = Some(format!("Unknown choice '{other}'. Enter 1-6."));
            (Screen::Menu { notice }, None)
        }
    }
}

/// Generate a key pair on the spot and move straight to the result screen.
fn generate_screen() -> Screen {
    let content = match generate_keypair() {
        Ok((key, address)) => format!(
            "New Private Key: {}\nCorresponding Ethereum Address: {}\n\n\
             WARNING: Store this private key securely. Never share it with anyone!",
            key.to_hex(),
            address,
        ),
        Err(err) => format!("Error generating private key: {err}"),
    };
    Screen::Display { content }
}

/// Convert screen: parse the key, derive the address, show it.
fn convert_key(key_hex: &str) -> (Screen, Option<Effect>) {
    if key_hex.is_empty() {
        let notice = Some("Error: Private key cannot be empty.".to_string());
        return (Screen::Convert { notice }, None);
    }
    match PrivateKey::from_hex(key_hex).and_then(|key| key.address()) {
        Ok(address) => (
            Screen::Display {
                content: format!("Ethereum Address: {address}"),
            },
            None,
        ),
        Err(err) => {
            let notice = Some(format!("Error converting private key: {err}"));
            (Screen::Convert { notice }, None)
        }
    }
}

/// Sign flow step 1: validate the key before asking for the message, so a
/// typo is caught immediately rather than after the message is typed.
fn sign_accept_key(key_hex: &str) -> (Screen, Option<Effect>) {
    if key_hex.is_empty() {
        let notice = Some("Error: Private key cannot be empty.".to_string());
        return (Screen::SignKey { notice }, None);
    }
    match PrivateKey::from_hex(key_hex) {
        Ok(_) => (
            Screen::SignMessage {
                key_hex: key_hex.to_string(),
                notice: None,
            },
            None,
        ),
        Err(_) => {
            let notice = Some("Error: Invalid private key format.".to_string());
            (Screen::SignKey { notice }, None)
        }
    }
}

/// Sign flow step 2: the message is taken verbatim — no trimming, the
/// bytes the user typed are the bytes that get signed.
fn sign_accept_message(key_hex: String, message: &str) -> (Screen, Option<Effect>) {
    if message.is_empty() {
        let notice = Some("Error: Message cannot be empty.".to_string());
        return (Screen::SignMessage { key_hex, notice }, None);
    }
    let signed = PrivateKey::from_hex(&key_hex).and_then(|key| key.sign(message.as_bytes()));
    match signed {
        Ok(signature) => (
            Screen::Display {
                content: format!("Signature:\n{signature}"),
            },
            None,
        ),
        Err(err) => {
            let notice = Some(format!("Error signing message: {err}"));
            (Screen::SignMessage { key_hex, notice }, None)
        }
    }
}

/// Verify flow step 3: all three inputs collected, run the verification.
fn verify_accept_address(
    message: String,
    signature: String,
    address: &str,
) -> (Screen, Option<Effect>) {
    if address.is_empty() {
        let notice = Some("Error: Ethereum address cannot be empty.".to_string());
        return (
            Screen::VerifyAddress {
                message,
                signature,
                notice,
            },
            None,
        );
    }
    match verify_signature(message.as_bytes(), &signature, address) {
        Ok(true) => (
            Screen::Display {
                content: "Signature is valid.".to_string(),
            },
            None,
        ),
        Ok(false) => (
            Screen::Display {
                content: "Signature is invalid.".to_string(),
            },
            None,
        ),
        Err(err) => {
            let notice = Some(format!("Error verifying signature: {err}"));
            (
                Screen::VerifyAddress {
                    message,
                    signature,
                    notice,
                },
                None,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethkit::airstack::{Cast, SocialProfile};

    fn line(s: &str) -> Event {
        Event::Line(s.to_string())
    }

    /// Drive a fresh machine through a sequence of lines, returning the
    /// final screen and the last effect seen.
    fn drive(lines: &[&str]) -> (Screen, Option<Effect>) {
        let mut screen = Screen::initial();
        let mut last_effect = None;
        for l in lines {
            let (next, effect) = update(screen, line(l));
            screen = next;
            if effect.is_some() {
                last_effect = effect;
            }
        }
        (screen, last_effect)
    }

    #[test]
    fn menu_routes_to_every_screen() {
        assert_eq!(drive(&["1"]).0, Screen::Convert { notice: None });
        assert_eq!(drive(&["3"]).0, Screen::Farcaster { notice: None });
        assert_eq!(drive(&["4"]).0, Screen::SignKey { notice: None });
        assert_eq!(drive(&["5"]).0, Screen::VerifyMessage { notice: None });
    }

    #[test]
    fn menu_quit_choices() {
        for quit in ["6", "q", "quit"] {
            let (screen, effect) = drive(&[quit]);
            assert_eq!(screen, Screen::Done);
            assert_eq!(effect, Some(Effect::Quit));
        }
    }

    #[test]
    fn menu_rejects_unknown_choice() {
        let (screen, effect) = drive(&["7"]);
        assert!(matches!(screen, Screen::Menu { notice: Some(_) }));
        assert_eq!(effect, None);
    }

    #[test]
    fn cancel_returns_to_menu_then_quits() {
        let (screen, _) = drive(&["1"]);
        let (screen, effect) = update(screen, Event::Cancel);
        assert_eq!(screen, Screen::Menu { notice: None });
        assert_eq!(effect, None);

        let (screen, effect) = update(screen, Event::Cancel);
        assert_eq!(screen, Screen::Done);
        assert_eq!(effect, Some(Effect::Quit));
    }

    #[test]
    fn convert_flow_shows_address() {
        let key_one = "0000000000000000000000000000000000000000000000000000000000000001";
        let (screen, _) = drive(&["1", key_one]);
        assert_eq!(
            screen,
            Screen::Display {
                content: "Ethereum Address: 0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
                    .to_string(),
            },
        );
    }

    #[test]
    fn convert_rejects_empty_and_stays() {
        let (screen, _) = drive(&["1", ""]);
        assert_eq!(
            screen,
            Screen::Convert {
                notice: Some("Error: Private key cannot be empty.".to_string()),
            },
        );
    }

    #[test]
    fn convert_reports_parse_error_and_allows_retry() {
        let (screen, _) = drive(&["1", "nothex"]);
        assert!(matches!(&screen, Screen::Convert { notice: Some(n) }
            if n.starts_with("Error converting private key:")));

        // The screen is still live: a correct key now succeeds.
        let key_one = "0000000000000000000000000000000000000000000000000000000000000001";
        let (screen, _) = update(screen, line(key_one));
        assert!(matches!(screen, Screen::Display { .. }));
    }

    #[test]
    fn generate_shows_key_and_warning() {
        let (screen, _) = drive(&["2"]);
        let Screen::Display { content } = screen else {
            panic!("expected display screen");
        };
        assert!(content.starts_with("New Private Key: "));
        assert!(content.contains("Corresponding Ethereum Address: 0x"));
        assert!(content.contains("WARNING"));
    }

    #[test]
    fn display_returns_to_menu_on_any_line() {
        let (screen, _) = drive(&["2", ""]);
        assert_eq!(screen, Screen::Menu { notice: None });
    }

    #[test]
    fn sign_flow_end_to_end() {
        let key_one = "0000000000000000000000000000000000000000000000000000000000000001";
        let (screen, _) = drive(&["4", key_one, "hello"]);
        let Screen::Display { content } = screen else {
            panic!("expected display screen");
        };
        assert!(content.starts_with("Signature:\n0x"));
        // 65 bytes, hex, 0x prefix.
        assert_eq!(content.len(), "Signature:\n".len() + 132);
    }

    #[test]
    fn sign_flow_validates_key_before_message_prompt() {
        let (screen, _) = drive(&["4", "xyz"]);
        assert_eq!(
            screen,
            Screen::SignKey {
                notice: Some("Error: Invalid private key format.".to_string()),
            },
        );
    }

    #[test]
    fn sign_flow_rejects_empty_message() {
        let key_one = "0000000000000000000000000000000000000000000000000000000000000001";
        let (screen, _) = drive(&["4", key_one, ""]);
        assert!(matches!(screen, Screen::SignMessage { notice: Some(_), .. }));
    }

    #[test]
    fn verify_flow_accepts_a_real_signature() {
        let (key, address) = generate_keypair().unwrap();
        let signature = key.sign(b"the message").unwrap().to_hex();
        let (screen, _) = drive(&["5", "the message", &signature, &address.to_string()]);
        assert_eq!(
            screen,
            Screen::Display {
                content: "Signature is valid.".to_string(),
            },
        );
    }

    #[test]
    fn verify_flow_reports_invalid_for_wrong_message() {
        let (key, address) = generate_keypair().unwrap();
        let signature = key.sign(b"the message").unwrap().to_hex();
        let (screen, _) = drive(&["5", "a different message", &signature, &address.to_string()]);
        assert_eq!(
            screen,
            Screen::Display {
                content: "Signature is invalid.".to_string(),
            },
        );
    }

    #[test]
    fn verify_flow_surfaces_format_errors_inline() {
        let (_, address) = generate_keypair().unwrap();
        let (screen, _) = drive(&["5", "msg", "0x1234", &address.to_string()]);
        assert!(matches!(&screen, Screen::VerifyAddress { notice: Some(n), .. }
            if n.starts_with("Error verifying signature:")));
    }

    #[test]
    fn verify_flow_threads_inputs_through_steps() {
        let (screen, _) = drive(&["5", "carry me", "0xsig"]);
        assert_eq!(
            screen,
            Screen::VerifyAddress {
                message: "carry me".to_string(),
                signature: "0xsig".to_string(),
                notice: None,
            },
        );
    }

    #[test]
    fn farcaster_flow_starts_lookup_effect() {
        let (screen, effect) = drive(&["3", "dwr.eth"]);
        assert_eq!(
            screen,
            Screen::AwaitingLookup {
                fname: "dwr.eth".to_string(),
            },
        );
        assert_eq!(effect, Some(Effect::StartLookup("dwr.eth".to_string())));
    }

    #[test]
    fn farcaster_rejects_empty_username() {
        let (screen, effect) = drive(&["3", "  "]);
        assert!(matches!(screen, Screen::Farcaster { notice: Some(_) }));
        assert_eq!(effect, None);
    }

    #[test]
    fn lookup_success_renders_profile() {
        let (screen, _) = drive(&["3", "dwr.eth"]);
        let account = FarcasterAccount {
            profiles: vec![serde_json::from_value::<SocialProfile>(serde_json::json!({
                "profileName": "dwr.eth",
                "followerCount": 10,
                "followingCount": 2,
                "farcasterScore": { "farScore": 1.5 }
            }))
            .unwrap()],
            casts: vec![Cast {
                text: "gm".to_string(),
                hash: "0xabc".to_string(),
            }],
        };
        let (screen, _) = update(screen, Event::LookupFinished(Ok(account)));
        let Screen::Display { content } = screen else {
            panic!("expected display screen");
        };
        assert!(content.contains("dwr.eth"));
        assert!(content.contains("Follower Count : 10"));
        assert!(content.contains("1. gm"));
    }

    #[test]
    fn lookup_empty_result_shows_no_data() {
        let (screen, _) = drive(&["3", "nobody"]);
        let (screen, _) =
            update(screen, Event::LookupFinished(Ok(FarcasterAccount::default())));
        assert_eq!(
            screen,
            Screen::Display {
                content: "No data found for the provided Farcaster username.".to_string(),
            },
        );
    }

    #[test]
    fn lookup_error_is_displayed_not_conflated() {
        let (screen, _) = drive(&["3", "whoever"]);
        let (screen, _) = update(
            screen,
            Event::LookupFinished(Err(LookupError::MissingApiKey)),
        );
        assert_eq!(
            screen,
            Screen::Display {
                content: "Error querying Airstack API: AIRSTACK_API_KEY not set".to_string(),
            },
        );
    }

    #[test]
    fn late_lookup_result_after_cancel_is_ignored() {
        let (screen, _) = drive(&["3", "whoever"]);
        let (screen, _) = update(screen, Event::Cancel);
        assert_eq!(screen, Screen::Menu { notice: None });

        let (screen, effect) = update(
            screen,
            Event::LookupFinished(Ok(FarcasterAccount::default())),
        );
        assert_eq!(screen, Screen::Menu { notice: None });
        assert_eq!(effect, None);
    }

    #[test]
    fn typing_during_lookup_changes_nothing() {
        let (screen, _) = drive(&["3", "whoever"]);
        let (screen, effect) = update(screen, line("impatient mashing"));
        assert_eq!(
            screen,
            Screen::AwaitingLookup {
                fname: "whoever".to_string(),
            },
        );
        assert_eq!(effect, None);
    }
}
