//! Bus stops: a waiting line plus the not-yet-materialized riders scheduled
//! to show up there.

use bus_core::{PersonId, SimTime, StopId};
use bus_schedule::ArrivalSchedule;

use crate::PersonStore;

/// One stop on the network.
///
/// Riders live in two places until they board:
///
/// - `schedule` holds future arrival times, grouped by destination.
/// - `people_waiting` holds riders already materialized into the
///   [`PersonStore`], in the order they arrived.
///
/// [`update`](Self::update) moves riders from the first to the second.  It is
/// called lazily, right before a bus needs an accurate view of the line.
#[derive(Clone, Debug)]
pub struct BusStop {
    pub id:   StopId,
    pub name: String,

    people_waiting: Vec<PersonId>,
    schedule:       ArrivalSchedule,
    arrived_total:  usize,
}

impl BusStop {
    pub fn new(id: StopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name:           name.into(),
            people_waiting: Vec::new(),
            schedule:       ArrivalSchedule::new(),
            arrived_total:  0,
        }
    }

    pub fn schedule(&self) -> &ArrivalSchedule {
        &self.schedule
    }

    pub(crate) fn schedule_mut(&mut self) -> &mut ArrivalSchedule {
        &mut self.schedule
    }

    /// Riders currently waiting, oldest first.
    #[inline]
    pub fn people_waiting(&self) -> &[PersonId] {
        &self.people_waiting
    }

    #[inline]
    pub fn num_waiting(&self) -> usize {
        self.people_waiting.len()
    }

    /// Riders materialized here so far.
    pub fn arrived_total(&self) -> usize {
        self.arrived_total
    }

    /// Materialize a single rider bound for `destination` who started
    /// waiting at `time`, and put them at the back of the line.
    pub fn admit(&mut self, people: &mut PersonStore, destination: StopId, time: SimTime) -> PersonId {
        let id = people.spawn(self.id, destination, time);
        self.people_waiting.push(id);
        self.arrived_total += 1;
        id
    }

    /// Materialize every scheduled rider whose arrival time is strictly
    /// before `time`.  Each keeps their scheduled time as `start_time`.
    ///
    /// Returns the number of riders added.  Calling again with the same (or
    /// an earlier) time adds nobody.
    pub fn update(&mut self, time: SimTime, people: &mut PersonStore) -> usize {
        let due = self.schedule.drain_due(time);
        for &(destination, at) in &due {
            self.admit(people, destination, at);
        }
        due.len()
    }

    /// How many riders would be waiting at `time`, without materializing
    /// anyone.  Used for snapshots between events.
    pub fn waiting_at(&self, time: SimTime) -> usize {
        self.people_waiting.len() + self.schedule.count_due(time)
    }

    /// Remove the rider at `index` in the waiting line.
    ///
    /// Returns `None` if `index` is past the end of the line.
    pub fn remove_waiting(&mut self, index: usize) -> Option<PersonId> {
        (index < self.people_waiting.len()).then(|| self.people_waiting.remove(index))
    }
}
