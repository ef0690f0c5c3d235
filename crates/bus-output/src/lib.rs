//! `bus-output` — raw record writers for the rust_bus simulator.
//!
//! The engine performs no aggregation; this crate dumps what it observes so
//! an external analysis step can compute hourly waiting counts, waiting-time
//! distributions, and per-bus mileage.
//!
//! | File                  | One row per                                    |
//! |-----------------------|------------------------------------------------|
//! | `events.csv`          | dispatched event                               |
//! | `stop_snapshots.csv`  | stop, per snapshot interval                    |
//! | `bus_snapshots.csv`   | bus, per snapshot interval                     |
//! | `people.csv`          | rider materialized during the run              |
//! | `buses.csv`           | bus, at the end of the run                     |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `bus_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bus_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! map.simulate(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{BusRow, BusSnapshotRow, EventRow, PersonRow, StopSnapshotRow};
pub use writer::OutputWriter;
