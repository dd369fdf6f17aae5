//! Identity and credential fingerprints
//!
//! All account-facing strings collapse to a [`Fingerprint`]: trim, lowercase,
//! SHA-256. The directory and message stores only ever see these digests, so
//! a compromised backend learns which digests talk to which digests and
//! nothing about who they are.
//!
//! Normalization happens before hashing, so `" Alice "` and `"alice"` map to
//! the same fingerprint by design. Credentials pass through the same path;
//! a digit-only credential is unchanged by normalization.

use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Byte length of a fingerprint digest.
pub const FINGERPRINT_SIZE: usize = 32;

/// Errors from parsing a fingerprint out of its hex form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FingerprintError {
    /// Hex string has the wrong length for a 32-byte digest
    #[error("invalid fingerprint length: expected {expected} hex chars, got {actual}")]
    InvalidLength {
        /// Expected number of hex characters (64)
        expected: usize,
        /// Actual number of characters supplied
        actual: usize,
    },

    /// Input contains characters outside `[0-9a-fA-F]`
    #[error("invalid hex in fingerprint")]
    InvalidHex,
}

/// SHA-256 digest of a normalized identity or credential string.
///
/// Renders as 64 lowercase hex characters. Ordinary equality is derived and
/// fine for map keys; authentication decisions must use
/// [`matches_ct`](Self::matches_ct) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_SIZE]);

impl Fingerprint {
    /// Fingerprint an identity or credential string.
    ///
    /// Normalizes first: leading/trailing whitespace is trimmed, then the
    /// string is lowercased. The empty string is valid input and produces
    /// the digest of the empty string.
    pub fn of_identity(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        let digest = Sha256::digest(normalized.as_bytes());
        let mut bytes = [0u8; FINGERPRINT_SIZE];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; FINGERPRINT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse a fingerprint from its 64-char hex rendering.
    pub fn from_hex(hex_str: &str) -> Result<Self, FingerprintError> {
        if hex_str.len() != FINGERPRINT_SIZE * 2 {
            return Err(FingerprintError::InvalidLength {
                expected: FINGERPRINT_SIZE * 2,
                actual: hex_str.len(),
            });
        }

        let decoded = hex::decode(hex_str).map_err(|_| FingerprintError::InvalidHex)?;
        let mut bytes = [0u8; FINGERPRINT_SIZE];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_SIZE] {
        &self.0
    }

    /// Lowercase hex rendering (64 chars).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Constant-time digest comparison.
    ///
    /// The authentication gate compares a candidate credential digest
    /// against either the stored digest or a fixed dummy; this comparison
    /// must not leak which one through timing.
    pub fn matches_ct(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl zeroize::Zeroize for Fingerprint {
    fn zeroize(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.0);
    }
}

impl serde::Serialize for Fingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Fingerprint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}
