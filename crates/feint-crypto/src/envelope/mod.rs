//! Symmetric envelope: key derivation and AEAD sealing
//!
//! A message body travels between mailboxes as an envelope sealed under a
//! key derived from the recipient's identity fingerprint. Two content
//! domains exist, each with its own fixed derivation salt:
//!
//! - [`KeyDomain::Text`]: message bodies and sender display names, armored
//!   as base64 for transport in text fields
//! - [`KeyDomain::File`]: attachment bytes, raw binary
//!
//! ```text
//! recipient Fingerprint (hex)
//!        │
//!        ▼ PBKDF2-HMAC-SHA256 × 100_000, domain salt
//! CipherKey (32 bytes)
//!        │  fresh random 12-byte nonce
//!        ▼
//! nonce ‖ ciphertext+tag      (File domain: raw bytes)
//! base64(nonce ‖ ct+tag)      (Text domain)
//! ```
//!
//! Sealing is pure: the caller provides the nonce randomness, which keeps
//! every function here deterministic under test.

pub mod derive;
pub mod error;
pub mod seal;

pub use derive::{CipherKey, KeyDomain, PBKDF2_ROUNDS, derive_key};
pub use error::EnvelopeError;
pub use seal::{NONCE_SIZE, open_bytes, open_text, seal_bytes, seal_text};
