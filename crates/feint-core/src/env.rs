//! Environment abstraction for deterministic testing.
//!
//! Decouples domain logic from system resources (time, randomness). Message
//! expiry runs against the environment's wall clock and every nonce or blob
//! handle is minted from its RNG, so a manually driven environment makes the
//! whole client deterministic under test.

use std::sync::{Arc, Mutex};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Abstract environment providing time and randomness.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `wall_clock_secs()` never goes backwards within a single execution
///   context
/// - `random_bytes()` uses cryptographically secure entropy in production
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall clock time as unix seconds.
    ///
    /// Message `created_at` and `expires_at` stamps come from here.
    fn wall_clock_secs(&self) -> u64;

    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    /// - Uses cryptographically secure RNG in production
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    ///
    /// Convenience for identifiers that don't need a full buffer.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }
}

/// Manually driven environment for tests and simulation.
///
/// The clock only moves when [`advance_secs`](Self::advance_secs) is called
/// and the RNG is a seeded `ChaCha8` stream, so runs are reproducible from
/// the seed. Clones share the same clock and RNG state.
#[derive(Clone)]
pub struct ManualEnv {
    inner: Arc<Mutex<ManualEnvInner>>,
}

struct ManualEnvInner {
    /// Current wall clock, unix seconds
    wall_clock: u64,
    /// Seeded deterministic RNG
    rng: ChaCha8Rng,
}

impl ManualEnv {
    /// Create an environment with the given RNG seed, clock at zero.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManualEnvInner {
                wall_clock: 0,
                rng: ChaCha8Rng::seed_from_u64(seed),
            })),
        }
    }

    /// Create an environment with a seed and a starting wall clock.
    pub fn with_seed_at(seed: u64, wall_clock_secs: u64) -> Self {
        let env = Self::with_seed(seed);
        env.set_wall_clock(wall_clock_secs);
        env
    }

    /// Advance the wall clock.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a thread panicked while
    /// holding the lock). This is acceptable for test/simulation code.
    #[allow(clippy::expect_used)]
    pub fn advance_secs(&self, secs: u64) {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        inner.wall_clock = inner.wall_clock.saturating_add(secs);
    }

    /// Set the wall clock to an absolute value.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test/simulation code.
    #[allow(clippy::expect_used)]
    pub fn set_wall_clock(&self, secs: u64) {
        self.inner.lock().expect("Mutex poisoned").wall_clock = secs;
    }
}

impl Environment for ManualEnv {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test/simulation code.
    #[allow(clippy::expect_used)]
    fn wall_clock_secs(&self) -> u64 {
        self.inner.lock().expect("Mutex poisoned").wall_clock
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for
    /// test/simulation code.
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        self.inner.lock().expect("Mutex poisoned").rng.fill_bytes(buffer);
    }
}
