//! Where a bus is between events.

use bus_core::{BusId, RouteId, SimTime, StopId};

/// The bus's current leg.
///
/// Buses teleport on arrival: between a departure and the matching arrival
/// event the bus is `Travelling`, and [`Leg::progress`] interpolates
/// linearly so visualization can draw it part-way along the leg.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Leg {
    Dwelling {
        stop:  StopId,
        since: SimTime,
    },
    Travelling {
        from:     StopId,
        to:       StopId,
        departed: SimTime,
        arrives:  SimTime,
    },
}

impl Leg {
    /// The stop the bus is at, or last left.
    pub fn last_stop(&self) -> StopId {
        match *self {
            Leg::Dwelling { stop, .. } => stop,
            Leg::Travelling { from, .. } => from,
        }
    }

    pub fn in_transit(&self) -> bool {
        matches!(self, Leg::Travelling { .. })
    }

    /// Fraction of the leg completed at `now`, in `[0.0, 1.0]`.
    ///
    /// `0.0` while dwelling; `1.0` for zero-length legs or once `now` has
    /// reached the arrival time.
    pub fn progress(&self, now: SimTime) -> f64 {
        match *self {
            Leg::Dwelling { .. } => 0.0,
            Leg::Travelling { departed, arrives, .. } => {
                if arrives <= departed {
                    return 1.0;
                }
                (now.since(departed) / arrives.since(departed)).clamp(0.0, 1.0)
            }
        }
    }
}

/// Snapshot of one bus's position, as exposed to visualization.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusPosition {
    pub bus:        BusId,
    pub route:      RouteId,
    pub last_stop:  StopId,
    pub next_stop:  StopId,
    pub in_transit: bool,
    pub progress:   f64,
    pub occupancy:  usize,
}
