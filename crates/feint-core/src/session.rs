//! Session and admission types
//!
//! A [`Session`] is what the gate hands back for every well-formed login
//! attempt. Real and decoy sessions carry exactly the same fields; only the
//! decoy flag differs, and that flag exists purely client-side. Nothing
//! derived from a session response may reveal which kind it is.

use std::fmt;

use feint_crypto::Fingerprint;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// An authenticated (or decoy-authenticated) mailbox session.
///
/// Serializes for hand-off to UI layers; fingerprints render as hex. The
/// credential fingerprint is password-equivalent against the directory, so
/// it is wiped when the session drops.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    /// Fingerprint of the normalized identity string
    identity: Fingerprint,
    /// Fingerprint of the credential as entered
    credential: Fingerprint,
    /// True when the gate routed this attempt to the decoy surface
    decoy: bool,
    /// Identity as the user typed it (trimmed), for greeting only
    display_name: String,
}

impl Session {
    /// Assemble a session. The gate is the normal constructor; tests build
    /// sessions directly to exercise decoy paths.
    pub fn new(
        identity: Fingerprint,
        credential: Fingerprint,
        decoy: bool,
        display_name: String,
    ) -> Self {
        Self { identity, credential, decoy, display_name }
    }

    /// Fingerprint of the normalized identity string.
    pub fn identity(&self) -> Fingerprint {
        self.identity
    }

    /// Fingerprint of the credential as entered.
    pub fn credential(&self) -> Fingerprint {
        self.credential
    }

    /// True when this session was routed to the decoy surface.
    pub fn is_decoy(&self) -> bool {
        self.decoy
    }

    /// True when this session unlocked the real mailbox.
    pub fn is_real(&self) -> bool {
        !self.decoy
    }

    /// Identity as the user typed it, for greeting only.
    ///
    /// Never sent to any store; the backend only ever sees fingerprints.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.credential.zeroize();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Credential digest stays out of logs
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("decoy", &self.decoy)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Outcome of an authentication attempt.
///
/// There is no failure arm for a wrong credential: every well-formed
/// attempt admits, and the two arms are structurally identical. Callers
/// that only need the session use [`into_session`](Self::into_session);
/// the arms exist so the UI layer can pick without re-reading the flag.
#[derive(Debug, Clone)]
pub enum Admission {
    /// Credential matched the directory entry
    Real(Session),
    /// Wrong credential or unknown identity; decoy surface from here on
    Decoy(Session),
}

impl Admission {
    /// True when this admission unlocked the real mailbox.
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }

    /// The admitted session, whichever arm it is.
    pub fn into_session(self) -> Session {
        match self {
            Self::Real(session) | Self::Decoy(session) => session,
        }
    }

    /// Borrow the admitted session, whichever arm it is.
    pub fn session(&self) -> &Session {
        match self {
            Self::Real(session) | Self::Decoy(session) => session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real_session() -> Session {
        Session::new(
            Fingerprint::of_identity("alice"),
            Fingerprint::of_identity("12345"),
            false,
            "Alice".to_string(),
        )
    }

    fn decoy_session() -> Session {
        Session::new(
            Fingerprint::of_identity("alice"),
            Fingerprint::of_identity("99999"),
            true,
            "Alice".to_string(),
        )
    }

    #[test]
    fn real_and_decoy_flags() {
        assert!(real_session().is_real());
        assert!(!real_session().is_decoy());
        assert!(decoy_session().is_decoy());
        assert!(!decoy_session().is_real());
    }

    #[test]
    fn admission_arm_matches_session_flag() {
        let real = Admission::Real(real_session());
        assert!(real.is_real());
        assert!(real.session().is_real());

        let decoy = Admission::Decoy(decoy_session());
        assert!(!decoy.is_real());
        assert!(decoy.session().is_decoy());
    }

    #[test]
    fn into_session_moves_either_arm() {
        assert!(Admission::Real(real_session()).into_session().is_real());
        assert!(Admission::Decoy(decoy_session()).into_session().is_decoy());
    }

    #[test]
    fn sessions_differ_only_in_flag() {
        // The structural-indistinguishability contract: same field set,
        // same types, flag aside.
        let real = real_session();
        let decoy = Session::new(real.identity(), real.credential(), true, "Alice".to_string());

        assert_eq!(real.identity(), decoy.identity());
        assert_eq!(real.credential(), decoy.credential());
        assert_eq!(real.display_name(), decoy.display_name());
        assert_ne!(real.is_decoy(), decoy.is_decoy());
    }

    #[test]
    fn debug_omits_credential_digest() {
        let session = real_session();
        let rendered = format!("{session:?}");
        assert!(!rendered.contains(&session.credential().to_hex()));
        assert!(rendered.contains("Alice"));
    }

    #[test]
    fn serde_roundtrip() {
        let session = real_session();
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(back.identity(), session.identity());
        assert_eq!(back.credential(), session.credential());
        assert_eq!(back.is_decoy(), session.is_decoy());
        assert_eq!(back.display_name(), session.display_name());
    }

    #[test]
    fn serde_renders_fingerprints_as_hex() {
        let session = real_session();
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains(&session.identity().to_hex()));
    }
}
