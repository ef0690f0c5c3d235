//! CSV arrival loader.
//!
//! # CSV format
//!
//! One row per rider.  Stops are referred to by name; the network builder
//! resolves names to `StopId`s.
//!
//! ```csv
//! origin,destination,time_mins
//! Wegmans-Eastbound,Commons-Eastbound,3.2
//! Wegmans-Eastbound,Collegetown,4.9
//! Collegetown,Commons-Westbound,0.7
//! ```
//!
//! Rows may appear in any order; each origin/destination list is sorted
//! after loading.  Pairs absent from the file simply get no riders.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bus_core::SimTime;

use crate::ScheduleError;

/// `origin name → destination name → ascending arrival times`.
///
/// `BTreeMap` keeps iteration order independent of hashing, so the same file
/// always produces the same rider materialization order.
pub type ArrivalTable = BTreeMap<String, BTreeMap<String, Vec<SimTime>>>;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArrivalRecord {
    origin:      String,
    destination: String,
    time_mins:   f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an [`ArrivalTable`] from a CSV file.
pub fn load_arrivals_csv(path: &Path) -> Result<ArrivalTable, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_arrivals_reader(file)
}

/// Like [`load_arrivals_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding a scenario in
/// a binary.
pub fn load_arrivals_reader<R: Read>(reader: R) -> Result<ArrivalTable, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = ArrivalTable::new();

    for (line, result) in csv_reader.deserialize::<ArrivalRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let time = SimTime::try_from_minutes(row.time_mins).map_err(|e| {
            ScheduleError::Parse(format!("row {}: {e}", line + 1))
        })?;
        if row.origin.trim() == row.destination.trim() {
            return Err(ScheduleError::Parse(format!(
                "row {}: origin and destination are both {:?}",
                line + 1,
                row.origin
            )));
        }
        table
            .entry(row.origin.trim().to_owned())
            .or_default()
            .entry(row.destination.trim().to_owned())
            .or_default()
            .push(time);
    }

    for times in table.values_mut().flat_map(|d| d.values_mut()) {
        times.sort_unstable();
    }

    Ok(table)
}
