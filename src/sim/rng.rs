//! Uniform random source used for wander jitter and spawn placement

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A uniform real generator. Swap in a scripted source for deterministic tests.
pub trait UniformSource {
    /// Uniform sample in `[min, max)`; returns `min` when the range is empty
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

impl UniformSource for Pcg32 {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if min < max { self.random_range(min..max) } else { min }
    }
}

/// Seeded generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
