//! # Screen Rendering
//!
//! Pure presentation: every screen variant maps to the text the terminal
//! shows, ending with the prompt the user is expected to answer. No state
//! lives here and nothing is written to stdout — `main.rs` does the
//! printing, these functions just build strings, which is what makes the
//! whole surface testable without a terminal.

use ethkit::airstack::FarcasterAccount;

use crate::state::Screen;

/// The top-level menu entries, in selection order.
const MENU_CHOICES: [&str; 6] = [
    "Convert Private Key to Address",
    "Generate New Private Key",
    "Check Farcaster Account",
    "Sign Message with Private Key",
    "Verify Signature",
    "Quit",
];

/// Render a screen to the text block shown in the terminal.
pub fn render(screen: &Screen) -> String {
    match screen {
        Screen::Menu { notice } => render_menu(notice.as_deref()),
        Screen::Convert { notice } => render_prompt(
            "Convert Private Key to Address",
            "Enter your Ethereum private key (in hex format), or press Ctrl+C to cancel:",
            notice.as_deref(),
        ),
        Screen::Farcaster { notice } => render_prompt(
            "Check Farcaster Account",
            "Enter Farcaster username, or press Ctrl+C to cancel:",
            notice.as_deref(),
        ),
        Screen::AwaitingLookup { fname } => {
            format!("Check Farcaster Account\n\nLooking up '{fname}'...\n")
        }
        Screen::SignKey { notice } => render_prompt(
            "Sign Message with Private Key",
            "Enter your Ethereum private key (in hex format), or press Ctrl+C to cancel:",
            notice.as_deref(),
        ),
        Screen::SignMessage { notice, .. } => render_prompt(
            "Sign Message with Private Key",
            "Enter the message you wish to sign, or press Ctrl+C to cancel:",
            notice.as_deref(),
        ),
        Screen::VerifyMessage { notice } => render_prompt(
            "Verify Signature",
            "Enter the message that was signed, or press Ctrl+C to cancel:",
            notice.as_deref(),
        ),
        Screen::VerifySignature { notice, .. } => render_prompt(
            "Verify Signature",
            "Enter the signature (in hex format), or press Ctrl+C to cancel:",
            notice.as_deref(),
        ),
        Screen::VerifyAddress { notice, .. } => render_prompt(
            "Verify Signature",
            "Enter the Ethereum address of the signer, or press Ctrl+C to cancel:",
            notice.as_deref(),
        ),
        Screen::Display { content } => {
            format!("{content}\n\nPress Enter to return to menu...\n")
        }
        Screen::Done => "Goodbye.\n".to_string(),
    }
}

fn render_menu(notice: Option<&str>) -> String {
    let mut out = String::from("Ethereum Tools Menu\n\n");
    for (i, choice) in MENU_CHOICES.iter().enumerate() {
        out.push_str(&format!("  {}) {}\n", i + 1, choice));
    }
    if let Some(notice) = notice {
        out.push_str(&format!("\n{notice}\n"));
    }
    out.push_str("\nSelect an option (1-6, q to quit): ");
    out
}

fn render_prompt(title: &str, prompt: &str, notice: Option<&str>) -> String {
    let mut out = format!("{title}\n\n");
    if let Some(notice) = notice {
        out.push_str(&format!("{notice}\n\n"));
    }
    out.push_str(prompt);
    out.push('\n');
    out
}

/// Format a Farcaster lookup result for the display screen.
///
/// Mirrors what the lookup returns: profile stats if a profile matched,
/// recent casts if there are any, and an explicit "none found" line for
/// each section that came back empty.
pub fn format_account(fname: &str, account: &FarcasterAccount) -> String {
    let mut out = format!("Results for Farcaster user '{fname}':\n\n");

    if let Some(profile) = account.profiles.first() {
        out.push_str("Profile Information:\n");
        out.push_str(&format!("Profile Name   : {}\n", profile.profile_name));
        out.push_str(&format!("Follower Count : {}\n", profile.follower_count));
        out.push_str(&format!("Following Count: {}\n", profile.following_count));
        out.push_str(&format!("FarScore       : {:.2}\n", profile.far_score()));
        out.push('\n');
    } else {
        out.push_str("No profile information found.\n\n");
    }

    if account.casts.is_empty() {
        out.push_str("No recent casts found.\n");
    } else {
        out.push_str("Recent Casts:\n");
        for (i, cast) in account.casts.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, cast.text));
        }
    }

    out
}
