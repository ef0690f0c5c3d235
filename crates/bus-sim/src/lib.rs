//! `bus-sim` — the discrete-event engine for the rust_bus simulator.
//!
//! # Event loop
//!
//! ```text
//! seed:   one Departure per bus at t = 0, at its route's first stop
//! loop:   pop the earliest event (FIFO among ties); stop if past horizon
//!   Departure(bus, stop) → hold per DeparturePolicy, board, seat riders
//!                          → Arrival(bus, next stop) after travel time
//!   Arrival(bus, stop)   → advance stop index, let riders off,
//!                          ReroutePolicy at the depot
//!                          → Departure(bus, stop) at the same instant
//! ```
//!
//! Every dispatch pushes exactly one successor, so the queue never runs dry
//! while buses exist.  Riders are materialized lazily, when a bus needs an
//! accurate view of a stop's line.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`run_replications`] on Rayon's thread pool.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `EventRecord`.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bus_core::{RouteId, SimConfig, SimTime};
//! use bus_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::new(SimTime::from_hours(18.0), 42);
//! let mut map = SimBuilder::new(config, network)
//!     .bus("Bus 1", RouteId(1))
//!     .build()?;
//! let summary = map.simulate(&mut NoopObserver)?;
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod map;
pub mod observer;
pub mod record;

#[cfg(test)]
mod tests;

pub use batch::{replication_seeds, run_replications};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use map::Map;
pub use observer::{NoopObserver, SimObserver};
pub use record::{EventRecord, RunSummary};
