//! `EventQueue` — the engine's pending-event set.
//!
//! # Ordering
//!
//! Events are keyed by timestamp in a `BTreeMap`; events sharing a timestamp
//! live in a `VecDeque` in insertion order.  `pop_next` therefore returns
//! the globally earliest event, and among equal timestamps the one pushed
//! first.  FIFO is the documented tie-break: with two buses leaving the
//! depot at time 0, bus 0 is always dispatched before bus 1.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) push and pop where W is the number of distinct
//! pending timestamps.  Every dispatch produces exactly one successor, so W
//! never exceeds the fleet size.

use std::collections::{BTreeMap, VecDeque};

use bus_core::SimTime;

use crate::Event;

/// A min-priority queue of [`Event`]s with stable FIFO ties.
#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `event` behind every event already queued at the same time.
    pub fn push(&mut self, event: Event) {
        self.inner.entry(event.time).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the earliest event, or `None` if the queue is empty.
    pub fn pop_next(&mut self) -> Option<Event> {
        let mut slot = self.inner.first_entry()?;
        let event = slot.get_mut().pop_front();
        if slot.get().is_empty() {
            slot.remove();
        }
        if event.is_some() {
            self.total -= 1;
        }
        event
    }

    /// The earliest event without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.inner.values().next().and_then(|q| q.front())
    }

    /// Timestamp of the earliest pending event.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Pending events in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.inner.values().flat_map(|q| q.iter())
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct timestamps with at least one pending event.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }
}
