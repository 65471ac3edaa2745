//! Owned, seedable random source for actors.
//!
//! Each actor owns its generator; there is no shared or global instance.
//! Given the same seed, an [`ActorRng`] always produces the same sequence,
//! which keeps actor creation and rebirth provisioning reproducible in tests
//! and replays.

use rand::distributions::Standard;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// ChaCha8 stream behind the small surface the actor rules roll with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorRng {
    inner: ChaCha8Rng,
}

impl ActorRng {
    pub fn seed_from(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Derives an independent generator, e.g. one per spawned actor.
    pub fn fork(&mut self) -> Self {
        Self::seed_from(self.next_u64())
    }

    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.inner.gen_range(0..bound)
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.inner.sample(Standard)
    }

    /// Uniform float in `[lo, hi)`; returns `lo` for an empty or non-finite range.
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo || !lo.is_finite() || !hi.is_finite() {
            return lo;
        }
        self.inner.gen_range(lo..hi)
    }

    /// Normally distributed float; `mean` itself when `stddev` is negative or NaN.
    pub fn norm_f64_range(&mut self, mean: f64, stddev: f64) -> f64 {
        match Normal::new(mean, stddev) {
            Ok(normal) => normal.sample(&mut self.inner),
            Err(_) => mean,
        }
    }

    /// Picks one element uniformly, `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}
