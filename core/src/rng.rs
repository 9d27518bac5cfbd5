//! Random number generation for draws.
//!
//! Every draw takes a `DrawRng`. Production code seeds it from OS entropy;
//! tests and `config.seed` pin it so the same inputs give the same draws.

use crate::error::{RaffleError, RaffleResult};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::sync::{Arc, Mutex, MutexGuard};

/// One RNG stream shared by the screens of a running app.
pub type SharedRng = Arc<Mutex<DrawRng>>;

pub struct DrawRng {
    seed: u64,
    inner: Pcg64Mcg,
}

impl DrawRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy. The chosen seed is logged so a surprising
    /// draw can be replayed.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        log::debug!("rng: seeded from entropy with {seed}");
        Self::from_seed(seed)
    }

    /// `Some(seed)` pins the stream, `None` draws fresh entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn shared(self) -> SharedRng {
        Arc::new(Mutex::new(self))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        rand::Rng::gen_bool(&mut self.inner, p.clamp(0.0, 1.0))
    }
}

impl RngCore for DrawRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

pub fn lock(rng: &SharedRng) -> RaffleResult<MutexGuard<'_, DrawRng>> {
    rng.lock().map_err(|_| RaffleError::LockPoisoned)
}
