//! Production environment using the system clock and OS RNG.

use feint_core::env::Environment;

/// Production environment backed by the system clock and OS RNG.
///
/// # Security
///
/// Randomness comes from getrandom, which reads the OS entropy source
/// (/dev/urandom on Linux, `BCryptGenRandom` on Windows). Suitable for
/// nonces and blob handles.
///
/// # Panics
///
/// Panics if the OS RNG fails. This is intentional - a client without
/// functioning cryptographic randomness cannot seal anything safely, and
/// RNG failure indicates an OS-level fault.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::disallowed_methods)]
    #[allow(clippy::expect_used)]
    fn wall_clock_secs(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("invariant: system clock is after Unix epoch (1970-01-01)")
            .as_secs()
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - client cannot seal securely");
    }
}
