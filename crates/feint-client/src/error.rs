//! Client error types.

use feint_core::{gate::GateError, store::StoreError};
use feint_crypto::EnvelopeError;
use thiserror::Error;

/// Errors surfaced by [`MailboxClient`](crate::MailboxClient) operations.
///
/// Decoy sessions never produce store or envelope errors; their operations
/// short-circuit before reaching either layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Credential is not the required shape
    #[error("credential must be exactly {expected} digits")]
    MalformedCredential {
        /// Required number of digits
        expected: usize,
    },

    /// Identity fingerprint is already claimed
    #[error("identity is already taken")]
    IdentityTaken,

    /// Presented credential does not match the account's stored digest
    #[error("credential does not match")]
    CredentialMismatch,

    /// Attachment exceeds the upload cap
    #[error("attachment of {actual} bytes exceeds the {max} byte cap")]
    AttachmentTooLarge {
        /// Upload cap in bytes
        max: usize,
        /// Size of the rejected attachment in bytes
        actual: usize,
    },

    /// Attachment blob is missing from the store
    #[error("attachment is no longer available")]
    AttachmentUnavailable,

    /// Sealed payload failed to open
    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Storage backend failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<GateError> for ClientError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::MalformedCredential { expected } => Self::MalformedCredential { expected },
            GateError::Directory(err) => Self::Store(err),
        }
    }
}
