//! Independent replications.
//!
//! Analysts compare policies over many seeded runs.  Each replication builds
//! its own `Map` from its seed, so runs share nothing and can execute on
//! Rayon's pool when the `parallel` feature is enabled.  Results come back
//! in seed order either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::SimResult;

/// `n` consecutive seeds starting at `base`.
pub fn replication_seeds(base: u64, n: usize) -> Vec<u64> {
    (0..n as u64).map(|i| base.wrapping_add(i)).collect()
}

/// Call `run` once per seed and collect the results in seed order.
///
/// One failed replication does not stop the others.
pub fn run_replications<T, F>(seeds: &[u64], run: F) -> Vec<SimResult<T>>
where
    T: Send,
    F: Fn(u64) -> SimResult<T> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        seeds.par_iter().map(|&seed| run(seed)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run(seed)).collect()
    }
}
