//! Deniable authentication gate
//!
//! Every well-formed login attempt is admitted. The gate classifies the
//! attempt internally (for the operator-side audit event) and hands back an
//! [`Admission`] whose two arms are structurally identical sessions:
//!
//! - identity known, credential digest matches -> [`Admission::Real`]
//! - identity known, digest mismatch -> [`Admission::Decoy`]
//! - identity unknown -> [`Admission::Decoy`]
//!
//! The only rejected shape is a malformed credential, and that is rejected
//! before any lookup so it cannot distinguish the three cases above.
//!
//! # Branch equivalence
//!
//! Each attempt performs exactly one directory lookup and one constant-time
//! digest comparison. When the identity is unknown, the comparison runs
//! against a fixed dummy digest, so the unknown-identity path does the same
//! work as the mismatch path and an observer timing the gate learns nothing
//! about whether the account exists.

use feint_crypto::Fingerprint;
use thiserror::Error;

use crate::{
    session::{Admission, Session},
    store::{AccountDirectory, StoreError},
};

/// Required credential length (ASCII digits).
pub const CREDENTIAL_LEN: usize = 5;

/// Fixed digest compared against when the identity is unknown.
///
/// The value never matters for correctness; it exists so the comparison
/// happens on every path.
const DUMMY_DIGEST: [u8; 32] = [0x5A; 32];

/// Errors from the authentication gate.
///
/// Note the absence of any wrong-credential variant. A wrong credential is
/// not an error; it admits into the decoy surface.
#[derive(Debug, Error)]
pub enum GateError {
    /// Credential is not the required shape
    #[error("credential must be exactly {expected} digits")]
    MalformedCredential {
        /// Required number of digits
        expected: usize,
    },

    /// Directory lookup failed at the storage layer
    #[error("directory unavailable: {0}")]
    Directory(#[from] StoreError),
}

/// Internal classification of an attempt, for the audit event only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptOutcome {
    Success,
    WrongCredential,
    UnknownIdentity,
}

impl AttemptOutcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::WrongCredential => "wrong_credential",
            Self::UnknownIdentity => "unknown_identity",
        }
    }
}

/// True when the credential has the required shape: exactly
/// [`CREDENTIAL_LEN`] ASCII digits.
pub fn is_valid_credential(credential: &str) -> bool {
    credential.len() == CREDENTIAL_LEN && credential.chars().all(|c| c.is_ascii_digit())
}

/// Run an authentication attempt through the gate.
///
/// Always returns an [`Admission`] for a well-formed credential. Emits a
/// single `login_attempt` audit event with the internal outcome; nothing
/// about the outcome reaches the returned value beyond the decoy flag.
///
/// # Errors
///
/// - `MalformedCredential`: credential shape is wrong (checked before any
///   lookup)
/// - `Directory`: the directory backend failed
pub fn admit<D: AccountDirectory>(
    directory: &D,
    identity: &str,
    credential: &str,
) -> Result<Admission, GateError> {
    if !is_valid_credential(credential) {
        return Err(GateError::MalformedCredential { expected: CREDENTIAL_LEN });
    }

    let identity_fp = Fingerprint::of_identity(identity);
    let credential_fp = Fingerprint::of_identity(credential);

    let stored = directory.credential_for(&identity_fp)?;

    // One comparison on every path. The dummy keeps the unknown-identity
    // arm doing the same work as the mismatch arm.
    let known = stored.is_some();
    let reference = stored.unwrap_or(Fingerprint::from_bytes(DUMMY_DIGEST));
    let matched = credential_fp.matches_ct(&reference);

    let outcome = match (known, matched) {
        (true, true) => AttemptOutcome::Success,
        (true, false) => AttemptOutcome::WrongCredential,
        (false, _) => AttemptOutcome::UnknownIdentity,
    };

    tracing::info!(identity = %identity_fp, outcome = outcome.as_str(), "login_attempt");

    let session = Session::new(
        identity_fp,
        credential_fp,
        outcome != AttemptOutcome::Success,
        identity.trim().to_string(),
    );

    Ok(if outcome == AttemptOutcome::Success {
        Admission::Real(session)
    } else {
        Admission::Decoy(session)
    })
}
