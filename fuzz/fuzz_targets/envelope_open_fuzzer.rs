//! Fuzz target for envelope sealing and opening
//!
//! Tests the AEAD envelope layer under adversarial inputs. Key derivation
//! runs once per process (it is deliberately slow); the fuzzer exercises
//! the seal/open paths against that fixed key.
//!
//! # Strategy
//!
//! - Arbitrary plaintexts (empty, small, large) with arbitrary nonces
//! - Arbitrary byte blobs fed straight into `open_bytes`
//! - Arbitrary strings fed straight into `open_text`
//! - Single-byte corruption of genuine envelopes
//!
//! # Invariants
//!
//! - Seal then open returns the original plaintext
//! - Envelope layout is nonce || ciphertext with constant overhead
//! - Opening never panics, whatever the input
//! - Envelopes below the minimum length report `Truncated`
//! - A genuine envelope with any byte flipped fails to open

#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use feint_crypto::{
    CipherKey, EnvelopeError, Fingerprint, KeyDomain, NONCE_SIZE, derive_key, open_bytes,
    open_text, seal_bytes,
};
use libfuzzer_sys::fuzz_target;

/// AEAD tag length; envelopes below nonce + tag cannot be genuine.
const TAG_SIZE: usize = 16;

static KEY: OnceLock<CipherKey> = OnceLock::new();

fn fixed_key() -> &'static CipherKey {
    KEY.get_or_init(|| derive_key(&Fingerprint::of_identity("fuzz-recipient"), KeyDomain::Text))
}

#[derive(Debug, Arbitrary)]
struct EnvelopeScenario {
    /// Plaintext for the roundtrip leg
    plaintext: Vec<u8>,
    /// Nonce for the roundtrip leg
    nonce: [u8; NONCE_SIZE],
    /// Index of the byte to corrupt, modulo envelope length
    corrupt_at: usize,
    /// Raw bytes opened as-is
    garbage: Vec<u8>,
    /// Raw string opened as armored text
    garbage_text: String,
}

fuzz_target!(|scenario: EnvelopeScenario| {
    let key = fixed_key();

    // INVARIANT 1: Roundtrip restores the plaintext
    let envelope = seal_bytes(key, scenario.nonce, &scenario.plaintext);
    let opened = open_bytes(key, &envelope);
    assert_eq!(opened.as_deref(), Ok(scenario.plaintext.as_slice()));

    // INVARIANT 2: Layout is nonce || ciphertext with constant overhead
    assert_eq!(&envelope[..NONCE_SIZE], &scenario.nonce);
    assert_eq!(envelope.len(), scenario.plaintext.len() + NONCE_SIZE + TAG_SIZE);

    // INVARIANT 3: Any single flipped byte fails authentication
    let mut corrupted = envelope.clone();
    let index = scenario.corrupt_at % corrupted.len();
    corrupted[index] ^= 0x01;
    assert!(open_bytes(key, &corrupted).is_err(), "corrupted envelope must fail");

    // INVARIANT 4: Opening arbitrary bytes never panics; short inputs
    // report Truncated
    let result = open_bytes(key, &scenario.garbage);
    if scenario.garbage.len() < NONCE_SIZE + TAG_SIZE {
        assert!(matches!(result, Err(EnvelopeError::Truncated { .. })));
    }

    // INVARIANT 5: Opening arbitrary text never panics
    let _ = open_text(key, &scenario.garbage_text);
});
