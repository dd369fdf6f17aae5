//! Feint Cryptographic Primitives
//!
//! Cryptographic building blocks for Feint mailboxes. Pure functions with
//! deterministic outputs. Callers provide random bytes for deterministic
//! testing.
//!
//! # Key Lifecycle
//!
//! Every account-facing secret reduces to a [`Fingerprint`]: identity
//! strings and credentials are normalized and digested, and nothing else
//! about them is ever stored or transmitted. Message confidentiality hangs
//! off the recipient's identity fingerprint, stretched into a symmetric key
//! per content domain.
//!
//! ```text
//! Identity / Credential String
//!        │
//!        ▼ normalize + SHA-256
//! Fingerprint (32 bytes, hex on the wire)
//!        │
//!        ▼ PBKDF2-HMAC-SHA256, fixed domain salt
//! CipherKey (text domain or file domain)
//!        │
//!        ▼ fresh 12-byte nonce
//! AEAD Envelope → nonce ‖ ciphertext+tag
//! ```
//!
//! Derived keys live only as long as a single seal or open call and are
//! zeroized on drop.
//!
//! # Security
//!
//! Confidentiality:
//! - ChaCha20-Poly1305 AEAD with a fresh random 96-bit nonce per envelope
//! - Key derivation is domain-separated: text and file envelopes never
//!   share a key even for the same recipient
//!
//! Authenticity:
//! - Poly1305 tag covers the full ciphertext; any tampering fails the open
//! - Failed opens report an error, never partial plaintext
//!
//! Deniability support:
//! - Fingerprints are one-way; the directory holds digests, not identities
//! - Digest equality checks run in constant time so an attempt against a
//!   missing account costs the same as a mismatched credential

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod envelope;
pub mod fingerprint;

pub use envelope::{
    CipherKey, EnvelopeError, KeyDomain, NONCE_SIZE, derive_key, open_bytes, open_text,
    seal_bytes, seal_text,
};
pub use fingerprint::{Fingerprint, FingerprintError};
