//! `bus-policy` — decision points the engine delegates to user code.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`context`]   | `PolicyContext<'a>` — read-only view passed to every policy   |
//! | [`reroute`]   | `ReroutePolicy` trait, `KeepRoute`, `RotateRoutes`            |
//! | [`departure`] | `DeparturePolicy` trait, `NoDelay`, `FixedDelay`              |
//! | [`error`]     | `PolicyError`, `PolicyResult<T>`                              |
//!
//! # When policies run
//!
//! Both hooks are called from inside the engine's single-threaded dispatch
//! step, so they may keep mutable state (`&mut self`) without locking.
//!
//! - `ReroutePolicy::reroute` runs after a bus has arrived at the network's
//!   depot and let its riders off, before it departs again.
//! - `DeparturePolicy::departure_delay` runs at every departure.  The delay
//!   is added to the event time to form the earliest-departure floor.

pub mod context;
pub mod departure;
pub mod error;
pub mod reroute;


pub use context::PolicyContext;
pub use departure::{DeparturePolicy, FixedDelay, NoDelay};
pub use error::{PolicyError, PolicyResult};
pub use reroute::{KeepRoute, ReroutePolicy, RotateRoutes};
