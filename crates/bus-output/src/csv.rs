//! CSV output backend.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::{
    BusRow, BusSnapshotRow, EventRow, OutputResult, OutputWriter, PersonRow, StopSnapshotRow,
};

/// Writes simulation output to five CSV files in a directory:
///
/// | File                  | Columns                                                                                  |
/// |-----------------------|------------------------------------------------------------------------------------------|
/// | `events.csv`          | seq, time, bus_id, route, stop_id, kind, occupancy, boarded, alighted, waiting, next_time |
/// | `stop_snapshots.csv`  | time, stop_id, stop_name, waiting                                                        |
/// | `bus_snapshots.csv`   | time, bus_id, route, last_stop, next_stop, in_transit, progress, occupancy               |
/// | `people.csv`          | person_id, origin, destination, state, start_time, waiting_time, boarded_at, alighted_at, bus_id |
/// | `buses.csv`           | bus_id, name, route, distance, boarded, alighted, occupancy                              |
///
/// The directory is created if missing.
pub struct CsvWriter {
    events:         Writer<File>,
    stop_snapshots: Writer<File>,
    bus_snapshots:  Writer<File>,
    people:         Writer<File>,
    buses:          Writer<File>,
    finished:       bool,
}

impl CsvWriter {
    /// Create (or truncate) the CSV files in `dir` and write their headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record([
            "seq", "time", "bus_id", "route", "stop_id", "kind", "occupancy", "boarded",
            "alighted", "waiting", "next_time",
        ])?;

        let mut stop_snapshots = Writer::from_path(dir.join("stop_snapshots.csv"))?;
        stop_snapshots.write_record(["time", "stop_id", "stop_name", "waiting"])?;

        let mut bus_snapshots = Writer::from_path(dir.join("bus_snapshots.csv"))?;
        bus_snapshots.write_record([
            "time", "bus_id", "route", "last_stop", "next_stop", "in_transit", "progress",
            "occupancy",
        ])?;

        let mut people = Writer::from_path(dir.join("people.csv"))?;
        people.write_record([
            "person_id", "origin", "destination", "state", "start_time", "waiting_time",
            "boarded_at", "alighted_at", "bus_id",
        ])?;

        let mut buses = Writer::from_path(dir.join("buses.csv"))?;
        buses.write_record(["bus_id", "name", "route", "distance", "boarded", "alighted", "occupancy"])?;

        Ok(Self { events, stop_snapshots, bus_snapshots, people, buses, finished: false })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for r in rows {
            self.events.write_record(&[
                r.seq.to_string(),
                r.time.to_string(),
                r.bus.0.to_string(),
                r.route.0.to_string(),
                r.stop.0.to_string(),
                r.kind.to_string(),
                r.occupancy.to_string(),
                r.boarded.to_string(),
                r.alighted.to_string(),
                r.waiting.to_string(),
                r.successor_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_stop_snapshots(&mut self, rows: &[StopSnapshotRow]) -> OutputResult<()> {
        for r in rows {
            self.stop_snapshots.write_record(&[
                r.time.to_string(),
                r.stop.0.to_string(),
                r.name.clone(),
                r.waiting.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_bus_snapshots(&mut self, rows: &[BusSnapshotRow]) -> OutputResult<()> {
        for r in rows {
            self.bus_snapshots.write_record(&[
                r.time.to_string(),
                r.bus.0.to_string(),
                r.route.0.to_string(),
                r.last_stop.0.to_string(),
                r.next_stop.0.to_string(),
                r.in_transit.to_string(),
                r.progress.to_string(),
                r.occupancy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_people(&mut self, rows: &[PersonRow]) -> OutputResult<()> {
        for r in rows {
            self.people.write_record(&[
                r.person.0.to_string(),
                r.origin.0.to_string(),
                r.destination.0.to_string(),
                r.state.to_string(),
                r.start_time.to_string(),
                opt(r.waiting_time),
                opt(r.boarded_at),
                opt(r.alighted_at),
                opt(r.bus.map(|b| b.0)),
            ])?;
        }
        Ok(())
    }

    fn write_buses(&mut self, rows: &[BusRow]) -> OutputResult<()> {
        for r in rows {
            self.buses.write_record(&[
                r.bus.0.to_string(),
                r.name.clone(),
                r.route.0.to_string(),
                r.distance.to_string(),
                r.boarded.to_string(),
                r.alighted.to_string(),
                r.occupancy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.events.flush()?;
        self.stop_snapshots.flush()?;
        self.bus_snapshots.flush()?;
        self.people.flush()?;
        self.buses.flush()?;
        self.finished = true;
        Ok(())
    }
}
