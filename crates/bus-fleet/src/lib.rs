//! `bus-fleet` — buses and how they move riders.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`bus`]      | `Bus` — arrive / board / depart                           |
//! | [`travel`]   | `TravelParams`, `TravelModel` (leg and boarding times)    |
//! | [`position`] | `Leg`, `BusPosition` (queryable state for visualization)  |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                            |
//!
//! # Event cycle
//!
//! Each bus alternates between two calls, each returning exactly one
//! successor event:
//!
//! ```text
//! Departure(stop) ──depart──▶ Arrival(next) ──arrive──▶ Departure(next) ──▶ …
//! ```
//!
//! `depart` boards riders, seats them, and schedules the arrival at the
//! next stop.  `arrive` advances the stop index, lets riders off, and
//! schedules a departure at the same instant.

pub mod bus;
pub mod error;
pub mod position;
pub mod travel;

#[cfg(test)]
mod tests;

pub use bus::{Bus, DEFAULT_SEATS, DEFAULT_STANDING};
pub use error::{FleetError, FleetResult};
pub use position::{BusPosition, Leg};
pub use travel::{TravelModel, TravelParams};
