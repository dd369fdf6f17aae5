//! Fuzz target for the authentication gate
//!
//! Runs arbitrary login attempts against a directory seeded with arbitrary
//! accounts and checks that the gate's admit-everything contract holds.
//!
//! # Strategy
//!
//! - Arbitrary identity/credential pairs registered up front
//! - Raw arbitrary credential attempts (almost always malformed)
//! - An optional forced well-formed attempt so the admitted paths get
//!   real coverage
//!
//! # Invariants
//!
//! - The gate never panics
//! - Malformed credentials are rejected without touching the directory
//! - Every well-formed attempt is admitted
//! - The admission is real exactly when the directory holds the identity
//!   with a matching credential digest
//! - Both arms carry the attempted identity and credential digests
//! - A well-formed attempt costs exactly one lookup and zero writes

#![no_main]

use arbitrary::Arbitrary;
use feint_core::{
    gate::{self, CREDENTIAL_LEN, GateError},
    store::{AccountDirectory, MemoryStore},
};
use feint_crypto::Fingerprint;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct GateScenario {
    /// Accounts registered before the attempt; u16 guarantees the stored
    /// credential is at most five digits
    accounts: Vec<(String, u16)>,
    /// Identity presented at the gate
    attempt_identity: String,
    /// Raw credential attempt
    attempt_credential: String,
    /// When set, overrides the raw attempt with a well-formed credential
    forced_digits: Option<u16>,
}

fuzz_target!(|scenario: GateScenario| {
    let directory = MemoryStore::new();
    for (identity, digits) in &scenario.accounts {
        let credential = format!("{digits:05}");
        // Colliding identities keep their first credential
        let _ = directory.claim(
            &Fingerprint::of_identity(identity),
            &Fingerprint::of_identity(&credential),
        );
    }

    let attempt_credential = match scenario.forced_digits {
        Some(digits) => format!("{digits:05}"),
        None => scenario.attempt_credential.clone(),
    };

    let identity_fp = Fingerprint::of_identity(&scenario.attempt_identity);
    let credential_fp = Fingerprint::of_identity(&attempt_credential);
    let stored = directory.credential_for(&identity_fp).expect("memory directory lookup");

    let ops_before = directory.op_count();
    let mutations_before = directory.mutation_count();

    // INVARIANT 1: The gate never panics
    let result = gate::admit(&directory, &scenario.attempt_identity, &attempt_credential);

    if !gate::is_valid_credential(&attempt_credential) {
        // INVARIANT 2: Malformed attempts are rejected before any lookup
        assert!(matches!(
            result,
            Err(GateError::MalformedCredential { expected: CREDENTIAL_LEN })
        ));
        assert_eq!(directory.op_count(), ops_before);
        return;
    }

    // INVARIANT 3: Every well-formed attempt is admitted
    let admission = result.expect("well-formed attempt must be admitted");

    // INVARIANT 4: Real exactly when the identity is registered with a
    // matching credential digest
    let expected_real = stored.is_some_and(|reference| reference == credential_fp);
    assert_eq!(admission.is_real(), expected_real);

    // INVARIANT 5: Both arms are sessions for the attempted identity,
    // carrying the digest of what was entered
    let session = admission.into_session();
    assert_eq!(session.is_real(), expected_real);
    assert_eq!(session.identity(), identity_fp);
    assert_eq!(session.credential(), credential_fp);
    assert_eq!(session.display_name(), scenario.attempt_identity.trim());

    // INVARIANT 6: One lookup, no writes
    assert_eq!(directory.op_count(), ops_before + 1);
    assert_eq!(directory.mutation_count(), mutations_before);
});
