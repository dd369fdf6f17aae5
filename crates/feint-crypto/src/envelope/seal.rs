//! Envelope sealing and opening with `ChaCha20-Poly1305`
//!
//! All functions are pure - random bytes must be provided by the caller.
//! This enables deterministic testing and keeps the crate free of I/O.
//!
//! Envelope layout is `nonce(12) ‖ ciphertext+tag`. The text path wraps the
//! same layout in standard base64 so it can travel in string fields.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit},
};

use super::{derive::CipherKey, error::EnvelopeError};

/// Size of the envelope nonce (12 bytes, IETF `ChaCha20-Poly1305`)
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag size (16 bytes)
const POLY1305_TAG_SIZE: usize = 16;

/// Seal raw bytes into an envelope.
///
/// Returns `nonce ‖ ciphertext+tag`. The nonce must be fresh random bytes
/// for every call; reusing a nonce under the same key breaks
/// confidentiality.
///
/// # Security
///
/// - Caller MUST provide cryptographically secure random bytes in production
/// - Authenticated encryption prevents tampering
pub fn seal_bytes(key: &CipherKey, nonce: [u8; NONCE_SIZE], plaintext: &[u8]) -> Vec<u8> {
    let cipher = ChaCha20Poly1305::new(key.key().into());

    let Ok(ciphertext) = cipher.encrypt(Nonce::from_slice(&nonce), plaintext) else {
        unreachable!("ChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut envelope = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);
    envelope
}

/// Open a raw envelope.
///
/// # Errors
///
/// - `Truncated`: envelope shorter than nonce plus tag
/// - `OpenFailed`: authentication tag or key is incorrect (tamper)
pub fn open_bytes(key: &CipherKey, envelope: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    if envelope.len() < NONCE_SIZE + POLY1305_TAG_SIZE {
        return Err(EnvelopeError::Truncated {
            expected_min: NONCE_SIZE + POLY1305_TAG_SIZE,
            actual: envelope.len(),
        });
    }

    let (nonce, ciphertext) = envelope.split_at(NONCE_SIZE);
    let cipher = ChaCha20Poly1305::new(key.key().into());

    cipher.decrypt(Nonce::from_slice(nonce), ciphertext).map_err(|_| EnvelopeError::OpenFailed)
}

/// Seal a string into a base64-armored envelope.
///
/// Standard alphabet with padding; the result is safe to place in any text
/// field.
pub fn seal_text(key: &CipherKey, nonce: [u8; NONCE_SIZE], plaintext: &str) -> String {
    STANDARD.encode(seal_bytes(key, nonce, plaintext.as_bytes()))
}

/// Open a base64-armored envelope back into a string.
///
/// # Errors
///
/// - `InvalidArmor`: input is not valid base64
/// - `Truncated` / `OpenFailed`: as [`open_bytes`]
/// - `NotText`: authenticated plaintext is not valid UTF-8
pub fn open_text(key: &CipherKey, armored: &str) -> Result<String, EnvelopeError> {
    let envelope = STANDARD.decode(armored).map_err(|_| EnvelopeError::InvalidArmor)?;
    let plaintext = open_bytes(key, &envelope)?;
    String::from_utf8(plaintext).map_err(|_| EnvelopeError::NotText)
}

#[cfg(test)]
mod tests {
    use super::{
        super::derive::{KeyDomain, derive_key},
        *,
    };
    use crate::fingerprint::Fingerprint;

    fn test_key(domain: KeyDomain) -> CipherKey {
        derive_key(&Fingerprint::of_identity("alice"), domain)
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = test_key(KeyDomain::File);
        let plaintext = b"Hello, World!";

        let envelope = seal_bytes(&key, [0xAB; NONCE_SIZE], plaintext);
        let opened = open_bytes(&key, &envelope).unwrap();

        assert_eq!(opened, plaintext);
    }

    #[test]
    fn seal_open_empty_plaintext() {
        let key = test_key(KeyDomain::File);

        let envelope = seal_bytes(&key, [0x00; NONCE_SIZE], b"");
        assert_eq!(envelope.len(), NONCE_SIZE + POLY1305_TAG_SIZE);

        let opened = open_bytes(&key, &envelope).unwrap();
        assert!(opened.is_empty());
    }

    #[test]
    fn seal_open_large_payload() {
        let key = test_key(KeyDomain::File);
        let plaintext = vec![0x42u8; 64 * 1024]; // 64KB

        let envelope = seal_bytes(&key, [0xFF; NONCE_SIZE], &plaintext);
        let opened = open_bytes(&key, &envelope).unwrap();

        assert_eq!(opened, plaintext);
    }

    #[test]
    fn envelope_layout_is_nonce_then_ciphertext() {
        let key = test_key(KeyDomain::File);
        let nonce = [0xCD; NONCE_SIZE];

        let envelope = seal_bytes(&key, nonce, b"payload");

        assert_eq!(&envelope[..NONCE_SIZE], &nonce);
        assert_eq!(envelope.len(), NONCE_SIZE + b"payload".len() + POLY1305_TAG_SIZE);
    }

    #[test]
    fn different_nonces_produce_different_envelopes() {
        let key = test_key(KeyDomain::File);
        let plaintext = b"same payload";

        let a = seal_bytes(&key, [0x00; NONCE_SIZE], plaintext);
        let b = seal_bytes(&key, [0x01; NONCE_SIZE], plaintext);

        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails_open() {
        let alice_key = test_key(KeyDomain::File);
        let bob_key = derive_key(&Fingerprint::of_identity("bob"), KeyDomain::File);

        let envelope = seal_bytes(&alice_key, [0x00; NONCE_SIZE], b"secret");

        assert_eq!(open_bytes(&bob_key, &envelope), Err(EnvelopeError::OpenFailed));
    }

    #[test]
    fn cross_domain_open_fails() {
        // A text-domain envelope never opens under the file-domain key,
        // even for the same recipient.
        let text_key = test_key(KeyDomain::Text);
        let file_key = test_key(KeyDomain::File);

        let envelope = seal_bytes(&text_key, [0x00; NONCE_SIZE], b"body");

        assert_eq!(open_bytes(&file_key, &envelope), Err(EnvelopeError::OpenFailed));
    }

    #[test]
    fn tampered_ciphertext_fails_open() {
        let key = test_key(KeyDomain::File);
        let mut envelope = seal_bytes(&key, [0x00; NONCE_SIZE], b"original");

        let last = envelope.len() - 1;
        envelope[last] ^= 0xFF;

        assert_eq!(open_bytes(&key, &envelope), Err(EnvelopeError::OpenFailed));
    }

    #[test]
    fn tampered_nonce_fails_open() {
        let key = test_key(KeyDomain::File);
        let mut envelope = seal_bytes(&key, [0x00; NONCE_SIZE], b"original");

        envelope[0] ^= 0xFF;

        assert_eq!(open_bytes(&key, &envelope), Err(EnvelopeError::OpenFailed));
    }

    #[test]
    fn truncated_envelope_is_rejected() {
        let key = test_key(KeyDomain::File);

        let result = open_bytes(&key, &[0u8; NONCE_SIZE + POLY1305_TAG_SIZE - 1]);

        assert_eq!(
            result,
            Err(EnvelopeError::Truncated {
                expected_min: NONCE_SIZE + POLY1305_TAG_SIZE,
                actual: NONCE_SIZE + POLY1305_TAG_SIZE - 1,
            })
        );
    }

    #[test]
    fn text_roundtrip() {
        let key = test_key(KeyDomain::Text);

        let armored = seal_text(&key, [0x11; NONCE_SIZE], "hello there");
        let opened = open_text(&key, &armored).unwrap();

        assert_eq!(opened, "hello there");
    }

    #[test]
    fn text_armor_is_base64() {
        let key = test_key(KeyDomain::Text);
        let armored = seal_text(&key, [0x22; NONCE_SIZE], "payload");

        assert!(STANDARD.decode(&armored).is_ok());
    }

    #[test]
    fn text_roundtrip_preserves_unicode() {
        let key = test_key(KeyDomain::Text);
        let message = "héllo wörld 你好 🎭";

        let armored = seal_text(&key, [0x33; NONCE_SIZE], message);

        assert_eq!(open_text(&key, &armored).unwrap(), message);
    }

    #[test]
    fn garbage_armor_is_rejected() {
        let key = test_key(KeyDomain::Text);
        assert_eq!(open_text(&key, "!!! not base64 !!!"), Err(EnvelopeError::InvalidArmor));
    }

    #[test]
    fn non_utf8_plaintext_in_text_domain_is_rejected() {
        let key = test_key(KeyDomain::Text);
        // Seal invalid UTF-8 through the byte path, then open as text
        let envelope = seal_bytes(&key, [0x44; NONCE_SIZE], &[0xFF, 0xFE, 0xFD]);
        let armored = STANDARD.encode(&envelope);

        assert_eq!(open_text(&key, &armored), Err(EnvelopeError::NotText));
    }
}
