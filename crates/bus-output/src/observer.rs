//! [`SimOutputObserver`] — bridges `bus_sim::SimObserver` to an
//! [`OutputWriter`].

use bus_core::SimTime;
use bus_fleet::Bus;
use bus_network::{PersonStore, TransitNetwork};
use bus_sim::{EventRecord, SimObserver};

use crate::{
    BusRow, BusSnapshotRow, EventRow, OutputError, OutputResult, OutputWriter, PersonRow,
    StopSnapshotRow,
};

/// A `SimObserver` that converts callbacks into rows and forwards them to
/// an [`OutputWriter`].
///
/// Observer callbacks cannot return errors, so the first writer error is
/// stored and the rest are dropped; check [`take_error`](Self::take_error)
/// after the run.  `on_sim_end` writes the rider and bus tables and
/// finishes the writer; anything observed after that is refused with
/// [`OutputError::Closed`].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    closed:     bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, closed: false, last_error: None }
    }

    /// Take the stored error, if any, leaving `None` in its place.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Whether `on_sim_end` has already finished the writer.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Consume the observer and return the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn guard(&mut self) -> bool {
        if self.closed {
            self.store_err(Err(OutputError::Closed));
        }
        !self.closed
    }

    fn snapshot(&mut self, time: SimTime, network: &TransitNetwork, buses: &[Bus]) -> OutputResult<()> {
        let mins = time.minutes();
        let stops: Vec<StopSnapshotRow> = network
            .stops
            .iter()
            .map(|s| StopSnapshotRow::at(mins, s, s.waiting_at(time)))
            .collect();
        self.writer.write_stop_snapshots(&stops)?;

        let mut rows = Vec::with_capacity(buses.len());
        for bus in buses {
            let route = network.route(bus.route())?;
            rows.push(BusSnapshotRow::at(mins, &bus.position(route, time)));
        }
        self.writer.write_bus_snapshots(&rows)
    }

    fn close(&mut self, people: &PersonStore, buses: &[Bus]) -> OutputResult<()> {
        let people: Vec<PersonRow> = people.iter().map(PersonRow::from).collect();
        self.writer.write_people(&people)?;
        let buses: Vec<BusRow> = buses.iter().map(BusRow::from).collect();
        self.writer.write_buses(&buses)?;
        self.writer.finish()
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_dispatch(&mut self, record: &EventRecord) {
        if !self.guard() {
            return;
        }
        let result = self.writer.write_events(&[EventRow::from(record)]);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, time: SimTime, network: &TransitNetwork, buses: &[Bus]) {
        if !self.guard() {
            return;
        }
        let result = self.snapshot(time, network, buses);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_time: SimTime, people: &PersonStore, buses: &[Bus]) {
        if !self.guard() {
            return;
        }
        let result = self.close(people, buses);
        self.store_err(result);
        self.closed = true;
    }
}
