//! Error types for envelope operations

use thiserror::Error;

/// Errors from sealing or opening an envelope.
///
/// Opening reports which structural stage failed but never anything about
/// the plaintext. A failed open yields no partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Text armor is not valid base64
    #[error("invalid envelope armor")]
    InvalidArmor,

    /// Envelope is too short to contain a nonce and authentication tag
    #[error("truncated envelope: need at least {expected_min} bytes, got {actual}")]
    Truncated {
        /// Minimum envelope size (nonce plus tag)
        expected_min: usize,
        /// Actual envelope size
        actual: usize,
    },

    /// Authentication failed (wrong key or tampered ciphertext)
    #[error("envelope authentication failed")]
    OpenFailed,

    /// Envelope opened but the plaintext is not valid UTF-8 text
    #[error("envelope payload is not text")]
    NotText,
}

impl EnvelopeError {
    /// Returns true if the envelope was structurally well formed but the
    /// authenticated open was refused.
    ///
    /// Structural errors mean the bytes were never a sealed envelope;
    /// authentication failures mean someone sealed it under another key or
    /// altered it in transit.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::OpenFailed)
    }
}
