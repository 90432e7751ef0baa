//! End-to-end integration tests for the ethkit core.
//!
//! These exercise the library the way the terminal tool does: strings in,
//! strings out. Everything goes through the public API — hex parsing,
//! address derivation, signing, hex round trips, and verification — so a
//! change that breaks the composition of those pieces fails here even if
//! every unit test still passes.
//!
//! Each test stands alone. No shared state, no ordering dependencies.

use ethkit::keys::{generate_keypair, verify_signature, Address, KeyError, PrivateKey};

/// The regression vector the whole pipeline hangs off: private key 1 is
/// the curve generator, and its address is a public well-known constant.
const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
const KEY_ONE_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

#[test]
fn convert_flow_fixed_vector() {
    let address = PrivateKey::from_hex(KEY_ONE)
        .expect("parse")
        .address()
        .expect("derive");
    assert_eq!(address.to_string(), KEY_ONE_ADDRESS);
}

#[test]
fn generate_sign_verify_full_cycle_through_strings() {
    // The exact flow the menu performs: generate, export as hex, re-import
    // from hex, sign, render the signature and address as strings, verify.
    let (key, address) = generate_keypair().expect("generate");
    let reimported = PrivateKey::from_hex(&key.to_hex()).expect("reimport");
    assert_eq!(reimported.address().expect("derive"), address);

    let message = "a message typed into a terminal";
    let signature = reimported.sign(message.as_bytes()).expect("sign");

    let valid = verify_signature(
        message.as_bytes(),
        &signature.to_hex(),
        &address.to_string(),
    )
    .expect("verify");
    assert!(valid);
}

#[test]
fn verification_accepts_unchecksummed_address_forms() {
    let key = PrivateKey::from_hex(KEY_ONE).unwrap();
    let signature = key.sign(b"case folding").unwrap().to_hex();

    for claimed in [
        KEY_ONE_ADDRESS.to_string(),
        KEY_ONE_ADDRESS.to_lowercase(),
        KEY_ONE_ADDRESS.to_uppercase().replace("0X", "0x"),
        KEY_ONE_ADDRESS.trim_start_matches("0x").to_string(),
    ] {
        assert!(
            verify_signature(b"case folding", &signature, &claimed).unwrap(),
            "claimed form rejected: {claimed}",
        );
    }
}

#[test]
fn every_tamper_direction_fails_closed() {
    let (key, address) = generate_keypair().unwrap();
    let message = b"tamper matrix";
    let signature = key.sign(message).unwrap();
    let sig_hex = signature.to_hex();
    let addr_str = address.to_string();

    // Message tampered: false.
    assert!(!verify_signature(b"tamper matrix!", &sig_hex, &addr_str).unwrap());

    // Address tampered (still syntactically valid): false.
    let other = Address::from_hex("0x0000000000000000000000000000000000000001").unwrap();
    assert!(!verify_signature(message, &sig_hex, &other.to_string()).unwrap());

    // Each byte of r||s flipped: false or RecoveryFailure, never true.
    let bytes = signature.as_bytes();
    for i in 0..64 {
        let mut tampered = *bytes;
        tampered[i] ^= 0xff;
        let tampered_hex = format!("0x{}", hex::encode(tampered));
        match verify_signature(message, &tampered_hex, &addr_str) {
            Ok(valid) => assert!(!valid, "byte {i} flip verified true"),
            Err(err) => assert_eq!(err, KeyError::RecoveryFailure, "byte {i}"),
        }
    }
}

#[test]
fn error_taxonomy_is_stable_across_the_string_api() {
    // The menu and CLI both match on these exact variants; renaming or
    // merging any of them is a user-visible behavior change.
    assert_eq!(PrivateKey::from_hex("").unwrap_err(), KeyError::EmptyInput);
    assert_eq!(
        PrivateKey::from_hex("abcd").unwrap_err(),
        KeyError::InvalidLength { actual: 4 },
    );
    assert_eq!(
        PrivateKey::from_hex(&"z".repeat(64)).unwrap_err(),
        KeyError::InvalidHex,
    );
    assert_eq!(
        PrivateKey::from_hex(&"0".repeat(64))
            .unwrap()
            .address()
            .unwrap_err(),
        KeyError::InvalidKey,
    );
    assert_eq!(
        verify_signature(b"m", "0x00", "bogus").unwrap_err(),
        KeyError::InvalidAddress,
    );
    assert_eq!(
        verify_signature(b"m", "0x00", KEY_ONE_ADDRESS).unwrap_err(),
        KeyError::InvalidSignatureFormat,
    );
    let zeroes = format!("0x{}", "00".repeat(65));
    assert_eq!(
        verify_signature(b"m", &zeroes, KEY_ONE_ADDRESS).unwrap_err(),
        KeyError::RecoveryFailure,
    );
}

#[test]
fn hundred_generated_keys_are_unique_and_verifiable() {
    let mut seen = std::collections::HashSet::new();
    for _ in 0..100 {
        let (key, address) = generate_keypair().unwrap();
        assert!(seen.insert(key.to_hex()), "duplicate key generated");

        let signature = key.sign(b"uniqueness sweep").unwrap();
        assert!(verify_signature(
            b"uniqueness sweep",
            &signature.to_hex(),
            &address.to_string(),
        )
        .unwrap());
    }
}
