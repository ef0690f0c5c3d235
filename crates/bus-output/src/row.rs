//! Plain record types written by [`OutputWriter`][crate::OutputWriter]
//! implementations.
//!
//! Times are minutes since the start of the simulated day.  Optional
//! columns are written empty when absent.

use bus_core::{BusId, PersonId, RouteId, StopId};
use bus_fleet::{Bus, BusPosition};
use bus_network::{BusStop, Person};
use bus_sim::EventRecord;

/// One row per dispatched event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventRow {
    pub seq:            u64,
    pub time:           f64,
    pub bus:            BusId,
    pub route:          RouteId,
    pub stop:           StopId,
    pub kind:           &'static str,
    pub occupancy:      usize,
    pub boarded:        usize,
    pub alighted:       usize,
    pub waiting:        usize,
    pub successor_time: f64,
}

impl From<&EventRecord> for EventRow {
    fn from(r: &EventRecord) -> Self {
        Self {
            seq:            r.seq,
            time:           r.time.minutes(),
            bus:            r.bus,
            route:          r.route,
            stop:           r.stop,
            kind:           r.kind.as_str(),
            occupancy:      r.occupancy,
            boarded:        r.boarded,
            alighted:       r.alighted,
            waiting:        r.waiting,
            successor_time: r.successor_time.minutes(),
        }
    }
}

/// Riders waiting at one stop at a snapshot instant.
#[derive(Clone, Debug, PartialEq)]
pub struct StopSnapshotRow {
    pub time:    f64,
    pub stop:    StopId,
    pub name:    String,
    pub waiting: usize,
}

impl StopSnapshotRow {
    pub fn at(time: f64, stop: &BusStop, waiting: usize) -> Self {
        Self { time, stop: stop.id, name: stop.name.clone(), waiting }
    }
}

/// Where one bus was at a snapshot instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BusSnapshotRow {
    pub time:       f64,
    pub bus:        BusId,
    pub route:      RouteId,
    pub last_stop:  StopId,
    pub next_stop:  StopId,
    pub in_transit: bool,
    /// Fraction of the current leg covered, in `[0, 1]`.
    pub progress:   f64,
    pub occupancy:  usize,
}

impl BusSnapshotRow {
    pub fn at(time: f64, p: &BusPosition) -> Self {
        Self {
            time,
            bus:        p.bus,
            route:      p.route,
            last_stop:  p.last_stop,
            next_stop:  p.next_stop,
            in_transit: p.in_transit,
            progress:   p.progress,
            occupancy:  p.occupancy,
        }
    }
}

/// Final state of one rider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PersonRow {
    pub person:       PersonId,
    pub origin:       StopId,
    pub destination:  StopId,
    pub state:        &'static str,
    pub start_time:   f64,
    pub waiting_time: Option<f64>,
    pub boarded_at:   Option<f64>,
    pub alighted_at:  Option<f64>,
    pub bus:          Option<BusId>,
}

impl From<&Person> for PersonRow {
    fn from(p: &Person) -> Self {
        Self {
            person:       p.id,
            origin:       p.origin,
            destination:  p.destination,
            state:        p.state().as_str(),
            start_time:   p.start_time.minutes(),
            waiting_time: p.waiting_time(),
            boarded_at:   p.boarded_at().map(|t| t.minutes()),
            alighted_at:  p.alighted_at().map(|t| t.minutes()),
            bus:          p.bus(),
        }
    }
}

/// End-of-run totals for one bus.
#[derive(Clone, Debug, PartialEq)]
pub struct BusRow {
    pub bus:       BusId,
    pub name:      String,
    pub route:     RouteId,
    /// Miles covered.
    pub distance:  f64,
    pub boarded:   usize,
    pub alighted:  usize,
    pub occupancy: usize,
}

impl From<&Bus> for BusRow {
    fn from(b: &Bus) -> Self {
        Self {
            bus:       b.id,
            name:      b.name.clone(),
            route:     b.route(),
            distance:  b.distance(),
            boarded:   b.boarded_total(),
            alighted:  b.alighted_total(),
            occupancy: b.occupancy(),
        }
    }
}
