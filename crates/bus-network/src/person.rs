//! Riders and the arena that owns them.

use bus_core::{BusId, PersonId, SimTime, StopId};

use crate::{NetworkError, NetworkResult};

// ── PersonState ───────────────────────────────────────────────────────────────

/// Where a rider is in their journey.
///
/// ```text
/// Waiting ──board──▶ Standing ◀──▶ Sitting ──alight──▶ Arrived
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PersonState {
    #[default]
    Waiting,
    Standing,
    Sitting,
    Arrived,
}

impl PersonState {
    /// `true` while the rider is on a bus.
    #[inline]
    pub fn is_onboard(self) -> bool {
        matches!(self, PersonState::Standing | PersonState::Sitting)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PersonState::Waiting  => "waiting",
            PersonState::Standing => "standing",
            PersonState::Sitting  => "sitting",
            PersonState::Arrived  => "arrived",
        }
    }
}

impl std::fmt::Display for PersonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Person ────────────────────────────────────────────────────────────────────

/// One rider.
///
/// Journey fields are private so the only way to change them is through the
/// state transitions below; in particular `waiting_time` is written exactly
/// once, when the rider boards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id:          PersonId,
    pub origin:      StopId,
    pub destination: StopId,
    /// Time the rider started waiting at `origin`.
    pub start_time:  SimTime,

    state:        PersonState,
    waiting_time: Option<f64>,
    boarded_at:   Option<SimTime>,
    bus:          Option<BusId>,
    alighted_at:  Option<SimTime>,
}

impl Person {
    fn new(id: PersonId, origin: StopId, destination: StopId, start_time: SimTime) -> Self {
        Self {
            id,
            origin,
            destination,
            start_time,
            state:        PersonState::Waiting,
            waiting_time: None,
            boarded_at:   None,
            bus:          None,
            alighted_at:  None,
        }
    }

    #[inline]
    pub fn state(&self) -> PersonState {
        self.state
    }

    /// Minutes spent at the origin stop.  `None` until the rider boards.
    #[inline]
    pub fn waiting_time(&self) -> Option<f64> {
        self.waiting_time
    }

    pub fn boarded_at(&self) -> Option<SimTime> {
        self.boarded_at
    }

    pub fn alighted_at(&self) -> Option<SimTime> {
        self.alighted_at
    }

    /// The bus the rider boarded, if any.
    pub fn bus(&self) -> Option<BusId> {
        self.bus
    }

    /// Minutes spent on the bus, once the rider has arrived.
    pub fn travel_time(&self) -> Option<f64> {
        Some(self.alighted_at? - self.boarded_at?)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Record boarding `bus` at `at`: sets `waiting_time` and makes the
    /// rider stand.
    ///
    /// # Errors
    /// [`NetworkError::AlreadyBoarded`] if the rider is not waiting.
    pub fn board(&mut self, bus: BusId, at: SimTime) -> NetworkResult<()> {
        if self.state != PersonState::Waiting || self.waiting_time.is_some() {
            return Err(NetworkError::AlreadyBoarded(self.id));
        }
        self.waiting_time = Some(at - self.start_time);
        self.boarded_at = Some(at);
        self.bus = Some(bus);
        self.state = PersonState::Standing;
        Ok(())
    }

    /// Take a seat.  No-op for riders who are not on a bus.
    pub fn sit(&mut self) {
        if self.state.is_onboard() {
            self.state = PersonState::Sitting;
        }
    }

    /// Get off at the destination.
    ///
    /// # Errors
    /// [`NetworkError::NotOnboard`] if the rider is not on a bus.
    pub fn alight(&mut self, at: SimTime) -> NetworkResult<()> {
        if !self.state.is_onboard() {
            return Err(NetworkError::NotOnboard(self.id));
        }
        self.alighted_at = Some(at);
        self.state = PersonState::Arrived;
        Ok(())
    }
}

// ── PersonStore ───────────────────────────────────────────────────────────────

/// Arena of every rider materialized during a run, indexed by `PersonId`.
///
/// IDs are assigned sequentially in materialization order and never reused.
#[derive(Clone, Debug, Default)]
pub struct PersonStore {
    people: Vec<Person>,
}

impl PersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a rider waiting at `origin` since `start_time`.
    pub fn spawn(&mut self, origin: StopId, destination: StopId, start_time: SimTime) -> PersonId {
        let id = PersonId(self.people.len() as u32);
        self.people.push(Person::new(id, origin, destination, start_time));
        id
    }

    pub fn get(&self, id: PersonId) -> NetworkResult<&Person> {
        self.people.get(id.index()).ok_or(NetworkError::PersonNotFound(id))
    }

    pub fn get_mut(&mut self, id: PersonId) -> NetworkResult<&mut Person> {
        self.people.get_mut(id.index()).ok_or(NetworkError::PersonNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// All riders in materialization order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> + '_ {
        self.people.iter()
    }

    /// Number of riders currently in `state`.
    pub fn count_in(&self, state: PersonState) -> usize {
        self.people.iter().filter(|p| p.state == state).count()
    }
}
