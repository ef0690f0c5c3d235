//! The `OutputWriter` trait implemented by backend writers.

use crate::{BusRow, BusSnapshotRow, EventRow, OutputResult, PersonRow, StopSnapshotRow};

/// A sink for raw simulation records.
///
/// When driven by [`SimOutputObserver`][crate::SimOutputObserver], errors
/// are stored and retrieved with
/// [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    fn write_stop_snapshots(&mut self, rows: &[StopSnapshotRow]) -> OutputResult<()>;

    fn write_bus_snapshots(&mut self, rows: &[BusSnapshotRow]) -> OutputResult<()>;

    /// One row per rider, written once at the end of the run.
    fn write_people(&mut self, rows: &[PersonRow]) -> OutputResult<()>;

    /// One row per bus, written once at the end of the run.
    fn write_buses(&mut self, rows: &[BusRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; later calls do nothing.
    fn finish(&mut self) -> OutputResult<()>;
}
