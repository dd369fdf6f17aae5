//! Fuzz target for identity fingerprinting
//!
//! Tests fingerprint derivation and hex parsing under adversarial inputs.
//!
//! # Strategy
//!
//! - Arbitrary identity strings (unicode, control characters, huge)
//! - Arbitrary strings fed into the hex parser
//! - Hex roundtrips through the rendered form
//!
//! # Invariants
//!
//! - Derivation never panics and is deterministic
//! - Normalization (trim + lowercase) is idempotent
//! - Rendered hex is exactly 64 lowercase hex characters
//! - `from_hex(to_hex())` restores the fingerprint
//! - Parsing arbitrary strings never panics; failures are length or
//!   character errors, never anything else

#![no_main]

use arbitrary::Arbitrary;
use feint_crypto::{Fingerprint, FingerprintError};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FingerprintScenario {
    /// Identity string to derive from
    identity: String,
    /// Arbitrary candidate for the hex parser
    hex_candidate: String,
}

fuzz_target!(|scenario: FingerprintScenario| {
    // INVARIANT 1: Derivation never panics, and repeats agree
    let fp = Fingerprint::of_identity(&scenario.identity);
    assert_eq!(fp, Fingerprint::of_identity(&scenario.identity));

    // INVARIANT 2: Normalization is idempotent
    let normalized = scenario.identity.trim().to_lowercase();
    assert_eq!(fp, Fingerprint::of_identity(&normalized));

    // INVARIANT 3: Rendered form is 64 lowercase hex characters
    let hex = fp.to_hex();
    assert_eq!(hex.len(), 64);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    // INVARIANT 4: Hex roundtrip restores the fingerprint
    assert_eq!(Fingerprint::from_hex(&hex), Ok(fp));

    // INVARIANT 5: Parsing arbitrary strings never panics and reports
    // structured errors
    match Fingerprint::from_hex(&scenario.hex_candidate) {
        Ok(parsed) => {
            // Only well-formed 64-char hex gets here; it must re-render
            // to an equivalent value
            assert_eq!(parsed.to_hex(), scenario.hex_candidate.to_lowercase());
        }
        Err(FingerprintError::InvalidLength { expected, .. }) => assert_eq!(expected, 64),
        Err(FingerprintError::InvalidHex) => assert_eq!(scenario.hex_candidate.len(), 64),
    }
});
