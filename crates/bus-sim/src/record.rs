//! Raw per-event records.

use bus_core::{BusId, RouteId, SimTime, StopId};
use bus_schedule::EventKind;

/// What happened when one event was dispatched.
///
/// Counts are taken after the event was processed: `occupancy` is the bus
/// load as it leaves (departure) or after riders got off (arrival), and
/// `waiting` is the line left behind at the stop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    /// Dispatch order, starting at 0.
    pub seq:            u64,
    pub time:           SimTime,
    pub bus:            BusId,
    pub route:          RouteId,
    pub stop:           StopId,
    pub kind:           EventKind,
    pub occupancy:      usize,
    pub boarded:        usize,
    pub alighted:       usize,
    pub waiting:        usize,
    /// When the event this one produced is due.
    pub successor_time: SimTime,
}

/// Returned by [`Map::simulate`](crate::Map::simulate) and friends.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Events dispatched by this call.
    pub dispatched: u64,
    /// Clock after the last dispatched event.
    pub final_time: SimTime,
    /// Events still queued (the first one is past the horizon).
    pub pending:    usize,
}
