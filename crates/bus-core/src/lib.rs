//! `bus-core` — foundational types for the `rust_bus` transit simulator.
//!
//! This crate is a dependency of every other `bus-*` crate.  It has no
//! `bus-*` dependencies and minimal external ones (`rand`, `ordered-float`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `StopId`, `RouteId`, `BusId`, `PersonId`              |
//! | [`time`]        | `SimTime`, `SimConfig`                                |
//! | [`rng`]         | `SimRng` (seeded, splittable)                         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{BusId, PersonId, RouteId, StopId};
pub use rng::SimRng;
pub use time::{SimConfig, SimTime};
