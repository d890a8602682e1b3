//! Seeded random draws
//!
//! Every random decision in the simulation goes through `SimRng`, so a run is
//! fully reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic RNG used by the factory and the motion engine
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    inner: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Uniform draw in [min, max). Returns `min` for an empty range.
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.unit() * (max - min)
    }

    /// Uniform integer in [min, max], both ends inclusive
    pub fn int_inclusive(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.inner.random_range(min..=max)
    }

    /// Uniform index into a collection of `len` items
    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.inner.random_range(0..len)
    }
}
