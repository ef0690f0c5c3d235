//! Departure holds.

use bus_fleet::Bus;
use bus_network::BusStop;

use crate::{PolicyContext, PolicyError, PolicyResult};

/// Minutes a bus must wait at `stop` before it may leave.
///
/// The engine adds the returned delay to the event time to form the
/// earliest-departure floor passed to `Bus::depart`.  Negative or NaN
/// delays are treated as zero.
pub trait DeparturePolicy {
    fn departure_delay(&mut self, bus: &Bus, stop: &BusStop, ctx: &PolicyContext<'_>) -> f64;
}

/// Buses leave as soon as boarding is done.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDelay;

impl DeparturePolicy for NoDelay {
    #[inline]
    fn departure_delay(&mut self, _bus: &Bus, _stop: &BusStop, _ctx: &PolicyContext<'_>) -> f64 {
        0.0
    }
}

/// Every departure is held for a constant number of minutes.
#[derive(Copy, Clone, Debug)]
pub struct FixedDelay(f64);

impl FixedDelay {
    pub fn new(minutes: f64) -> PolicyResult<Self> {
        if !(minutes.is_finite() && minutes >= 0.0) {
            return Err(PolicyError::InvalidDelay(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> f64 {
        self.0
    }
}

impl DeparturePolicy for FixedDelay {
    #[inline]
    fn departure_delay(&mut self, _bus: &Bus, _stop: &BusStop, _ctx: &PolicyContext<'_>) -> f64 {
        self.0
    }
}
