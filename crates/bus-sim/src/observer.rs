//! Simulation observer trait for progress reporting and data collection.

use bus_core::SimTime;
use bus_fleet::Bus;
use bus_network::{PersonStore, TransitNetwork};

use crate::EventRecord;

/// Callbacks invoked by [`Map::simulate`][crate::Map::simulate] at key
/// points in the event loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — hourly printer
///
/// ```rust,ignore
/// struct Hourly;
///
/// impl SimObserver for Hourly {
///     fn on_snapshot(&mut self, time: SimTime, network: &TransitNetwork, _buses: &[Bus]) {
///         let waiting: usize = network.stops.iter().map(|s| s.waiting_at(time)).sum();
///         println!("{time}: {waiting} waiting");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called when a run (or a resumed run) begins.
    fn on_sim_start(&mut self, _now: SimTime, _horizon: SimTime) {}

    /// Called after every dispatched event.
    fn on_dispatch(&mut self, _record: &EventRecord) {}

    /// Called every `config.snapshot_interval_mins` of simulated time.
    ///
    /// `time` may fall between events; use `BusStop::waiting_at(time)` and
    /// `Bus::position(route, time)` to read state as of that instant.
    fn on_snapshot(&mut self, _time: SimTime, _network: &TransitNetwork, _buses: &[Bus]) {}

    /// Called once the horizon is reached.
    fn on_sim_end(&mut self, _final_time: SimTime, _people: &PersonStore, _buses: &[Bus]) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
