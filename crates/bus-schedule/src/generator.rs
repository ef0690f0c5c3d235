//! `ArrivalGenerator` — scenario hooks that produce arrival time lists.
//!
//! The engine never generates riders itself; a scenario builder calls a
//! generator once per origin/destination pair and hands the resulting
//! ascending list to the stop.  Two generators ship with the crate:
//!
//! - [`PoissonArrivals`]: exponential inter-arrival gaps, cumulatively
//!   summed (a Poisson process).  The Ithaca scenario uses a 5-minute mean
//!   gap and 20 riders per pair.
//! - [`FixedArrivals`]: a pre-computed list, for replaying a recorded day or
//!   for deterministic tests.

use rand_distr::Exp;

use bus_core::{SimRng, SimTime};

use crate::{ScheduleError, ScheduleResult};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Produces one ascending list of arrival times.
///
/// # Contract
///
/// - The returned list must be sorted ascending.
/// - Must be deterministic given the same `rng` state.
pub trait ArrivalGenerator {
    fn generate(&self, rng: &mut SimRng) -> ScheduleResult<Vec<SimTime>>;
}

// ── Poisson ───────────────────────────────────────────────────────────────────

/// Riders arrive with exponentially distributed gaps of mean `mean_gap_mins`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoissonArrivals {
    pub mean_gap_mins: f64,
    /// Maximum number of riders to generate.
    pub count: usize,
    /// Optional cut-off: arrivals at or after this time are dropped.
    pub until: Option<SimTime>,
}

impl PoissonArrivals {
    pub fn new(mean_gap_mins: f64, count: usize) -> Self {
        Self { mean_gap_mins, count, until: None }
    }

    /// Stop generating at `until` instead of after a fixed count.
    pub fn until(mut self, until: SimTime) -> Self {
        self.until = Some(until);
        self
    }
}

impl ArrivalGenerator for PoissonArrivals {
    fn generate(&self, rng: &mut SimRng) -> ScheduleResult<Vec<SimTime>> {
        if !(self.mean_gap_mins.is_finite() && self.mean_gap_mins > 0.0) {
            return Err(ScheduleError::Distribution(format!(
                "mean gap must be positive, got {}",
                self.mean_gap_mins
            )));
        }
        let gaps = Exp::new(1.0 / self.mean_gap_mins)
            .map_err(|e| ScheduleError::Distribution(format!("{e:?}")))?;

        let mut times = Vec::with_capacity(self.count.min(4_096));
        let mut now = 0.0;
        while times.len() < self.count {
            now += rng.sample(&gaps);
            let t = SimTime::from_minutes(now);
            if self.until.is_some_and(|limit| t >= limit) {
                break;
            }
            times.push(t);
        }
        Ok(times)
    }
}

// ── Fixed ─────────────────────────────────────────────────────────────────────

/// A pre-computed arrival list, sorted on construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedArrivals(Vec<SimTime>);

impl FixedArrivals {
    pub fn new(mut times: Vec<SimTime>) -> Self {
        times.sort_unstable();
        Self(times)
    }

    /// Convenience for tests and literal scenarios.
    pub fn from_minutes(minutes: &[f64]) -> ScheduleResult<Self> {
        let times = minutes
            .iter()
            .map(|&m| SimTime::try_from_minutes(m))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(times))
    }

    pub fn times(&self) -> &[SimTime] {
        &self.0
    }
}

impl ArrivalGenerator for FixedArrivals {
    fn generate(&self, _rng: &mut SimRng) -> ScheduleResult<Vec<SimTime>> {
        Ok(self.0.clone())
    }
}
