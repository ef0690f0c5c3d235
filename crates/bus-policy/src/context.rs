//! Read-only simulation state passed to every policy callback.

use bus_core::SimTime;
use bus_fleet::Bus;
use bus_network::{PersonStore, TransitNetwork};

/// A read-only snapshot of the engine, built fresh for each callback.
///
/// All borrows live for the duration of one call.  The engine never allows
/// mutable access to these structures while a `PolicyContext` is live.
pub struct PolicyContext<'a> {
    /// Time of the event being dispatched.
    pub now:     SimTime,
    pub network: &'a TransitNetwork,
    /// Every bus, indexed by `BusId`.
    pub buses:   &'a [Bus],
    pub people:  &'a PersonStore,
}

impl<'a> PolicyContext<'a> {
    #[inline]
    pub fn new(
        now:     SimTime,
        network: &'a TransitNetwork,
        buses:   &'a [Bus],
        people:  &'a PersonStore,
    ) -> Self {
        Self { now, network, buses, people }
    }
}
