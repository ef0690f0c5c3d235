//! Engine events — timestamped intents for one bus at one stop.

use bus_core::{BusId, SimTime, StopId};

/// What the bus does at the stop when the event fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// The bus pulls in: riders for this stop get off.
    Arrival,
    /// The bus boards waiting riders and leaves for its next stop.
    Departure,
}

impl EventKind {
    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Arrival   => "arrival",
            EventKind::Departure => "departure",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled event.  Immutable once created; owned by the `EventQueue`
/// until dispatched, then discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time: SimTime,
    pub bus:  BusId,
    pub stop: StopId,
    pub kind: EventKind,
}

impl Event {
    #[inline]
    pub fn arrival(time: SimTime, bus: BusId, stop: StopId) -> Self {
        Self { time, bus, stop, kind: EventKind::Arrival }
    }

    #[inline]
    pub fn departure(time: SimTime, bus: BusId, stop: StopId) -> Self {
        Self { time, bus, stop, kind: EventKind::Departure }
    }
}
