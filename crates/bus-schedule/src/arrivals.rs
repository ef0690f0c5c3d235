//! Per-stop passenger arrival schedules.
//!
//! An [`ArrivalStream`] is the ascending list of times at which riders bound
//! for one destination show up at a stop.  The list is immutable; a cursor
//! marks how much of it has been turned into riders.  An [`ArrivalSchedule`]
//! groups the streams of one stop.

use bus_core::{SimTime, StopId};

use crate::{ScheduleError, ScheduleResult};

// ── ArrivalStream ─────────────────────────────────────────────────────────────

/// Future arrivals at one stop for one destination.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrivalStream {
    destination: StopId,
    /// Ascending (non-decreasing) arrival times.
    times: Vec<SimTime>,
    /// Index of the first arrival not yet materialized.
    cursor: usize,
}

impl ArrivalStream {
    /// Build a stream, rejecting lists that are not in ascending order.
    pub fn new(destination: StopId, times: Vec<SimTime>) -> ScheduleResult<Self> {
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(ScheduleError::Unsorted { destination, position: i + 1 });
        }
        Ok(Self { destination, times, cursor: 0 })
    }

    pub fn destination(&self) -> StopId {
        self.destination
    }

    /// Arrivals not yet materialized.
    pub fn remaining(&self) -> &[SimTime] {
        &self.times[self.cursor..]
    }

    /// Arrivals already materialized.
    pub fn consumed(&self) -> &[SimTime] {
        &self.times[..self.cursor]
    }

    /// The next arrival not yet materialized.
    pub fn peek(&self) -> Option<SimTime> {
        self.times.get(self.cursor).copied()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.times.len()
    }

    /// Number of remaining arrivals strictly before `time`, without consuming.
    pub fn count_due(&self, time: SimTime) -> usize {
        self.remaining().partition_point(|&t| t < time)
    }

    /// Consume every remaining arrival strictly before `time` and return it.
    ///
    /// Consumption stops at the first timestamp `>= time`; everything after
    /// it is guaranteed to be no earlier.  Calling this twice with the same
    /// `time` returns an empty slice the second time.
    pub fn take_due(&mut self, time: SimTime) -> &[SimTime] {
        let start = self.cursor;
        self.cursor += self.count_due(time);
        &self.times[start..self.cursor]
    }
}

// ── ArrivalSchedule ───────────────────────────────────────────────────────────

/// All future arrivals at one stop, grouped by destination.
///
/// Streams are kept in insertion order, which fixes the order in which
/// riders for different destinations join the waiting line when several
/// come due in the same update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrivalSchedule {
    streams: Vec<ArrivalStream>,
}

impl ArrivalSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add arrivals for `destination`.
    ///
    /// If the destination already has a stream, its unconsumed arrivals are
    /// merged with `times` and re-sorted; `times` itself must be ascending.
    pub fn insert(&mut self, destination: StopId, times: Vec<SimTime>) -> ScheduleResult<()> {
        let incoming = ArrivalStream::new(destination, times)?;
        match self.streams.iter_mut().find(|s| s.destination == destination) {
            None => self.streams.push(incoming),
            Some(existing) => {
                let mut merged = existing.remaining().to_vec();
                merged.extend_from_slice(incoming.remaining());
                merged.sort_unstable();
                *existing = ArrivalStream::new(destination, merged)?;
            }
        }
        Ok(())
    }

    pub fn streams(&self) -> &[ArrivalStream] {
        &self.streams
    }

    pub fn is_empty(&self) -> bool {
        self.streams.iter().all(ArrivalStream::is_exhausted)
    }

    /// Total arrivals not yet materialized across all destinations.
    pub fn remaining(&self) -> usize {
        self.streams.iter().map(|s| s.remaining().len()).sum()
    }

    /// Earliest unconsumed arrival over all destinations.
    pub fn next_arrival(&self) -> Option<SimTime> {
        self.streams.iter().filter_map(ArrivalStream::peek).min()
    }

    /// Arrivals strictly before `time` that have not been consumed yet.
    pub fn count_due(&self, time: SimTime) -> usize {
        self.streams.iter().map(|s| s.count_due(time)).sum()
    }

    /// Consume every arrival strictly before `time`, returning
    /// `(destination, arrival_time)` pairs in arrival order.
    ///
    /// Riders arriving at the same instant keep the order their
    /// destinations were inserted in.
    pub fn drain_due(&mut self, time: SimTime) -> Vec<(StopId, SimTime)> {
        let mut due = Vec::new();
        for stream in &mut self.streams {
            let destination = stream.destination;
            due.extend(stream.take_due(time).iter().map(|&t| (destination, t)));
        }
        due.sort_by_key(|&(_, at)| at);
        due
    }
}
