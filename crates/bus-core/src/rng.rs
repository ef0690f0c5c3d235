//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one [`SimRng`] seeded from `SimConfig::seed`.  Every
//! stochastic draw in the engine (boarding delays, long-haul travel times)
//! happens inside the single-threaded dispatch step, so draw order is fixed
//! by event order and the same seed reproduces the same run bit for bit.
//!
//! Scenario generators that run *before* the engine derive their own
//! streams with [`SimRng::child`], so adding a new origin/destination pair
//! does not shift the draws of the engine itself.
//!
//! Sampling goes through `rand` / `rand_distr` distribution objects
//! (`Uniform`, `Triangular`, `Exp`) built once and passed by reference to
//! [`SimRng::sample`].

use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts.  Independent replications each
/// construct their own `SimRng` from their own seed.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, giving each
    /// scenario generator its own reproducible stream.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Draw one value from a pre-built distribution.
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.0)
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
