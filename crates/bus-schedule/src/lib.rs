//! `bus-schedule` — what happens when: engine events, the pending-event
//! queue, and per-stop passenger arrival schedules.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`event`]     | `Event`, `EventKind`                                      |
//! | [`queue`]     | `EventQueue` (`BTreeMap<SimTime, VecDeque<Event>>`)       |
//! | [`arrivals`]  | `ArrivalStream`, `ArrivalSchedule` (cursor consumption)   |
//! | [`generator`] | `ArrivalGenerator` trait, `PoissonArrivals`, `FixedArrivals` |
//! | [`loader`]    | `load_arrivals_csv`, `load_arrivals_reader`, `ArrivalTable` |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Consumption model (summary)
//!
//! Every stop holds, per destination, an ascending list of future rider
//! arrival times and a cursor into it.  When simulated time reaches `t`:
//!
//! ```text
//! due      = times[cursor .. partition_point(|x| x < t)]
//! cursor  += due.len()
//! ```
//!
//! The list itself is never mutated, so a cut-off time can be replayed in
//! tests and the remaining schedule stays inspectable.

pub mod arrivals;
pub mod error;
pub mod event;
pub mod generator;
pub mod loader;
pub mod queue;


pub use arrivals::{ArrivalSchedule, ArrivalStream};
pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventKind};
pub use generator::{ArrivalGenerator, FixedArrivals, PoissonArrivals};
pub use loader::{ArrivalTable, load_arrivals_csv, load_arrivals_reader};
pub use queue::EventQueue;
