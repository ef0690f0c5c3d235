//! The `Bus` entity.

use tracing::trace;

use bus_core::{BusId, PersonId, RouteId, SimRng, SimTime, StopId};
use bus_network::{BusStop, PersonStore, Route};
use bus_schedule::Event;

use crate::{BusPosition, FleetError, FleetResult, Leg, TravelModel};

pub const DEFAULT_SEATS: usize = 25;
pub const DEFAULT_STANDING: usize = 10;

/// A bus bound to one route at a time.
///
/// The bus never holds a reference to its route or stops; every operation
/// takes the `&Route` it should use, and checks it matches the route the bus
/// is assigned to.
///
/// # Invariants
///
/// - `passengers.len() <= seat_capacity + standing_capacity`.
/// - `next_stop_index` is in `1..route.len()`.
#[derive(Clone, Debug)]
pub struct Bus {
    pub id:                BusId,
    pub name:              String,
    pub seat_capacity:     usize,
    pub standing_capacity: usize,

    route:           RouteId,
    next_stop_index: usize,
    /// Riders on board, in boarding order.
    passengers:      Vec<PersonId>,
    /// Cumulative miles driven.
    distance:        f64,
    leg:             Leg,
    boarded_total:   usize,
    alighted_total:  usize,
}

impl Bus {
    /// A bus parked at the first stop of `route`, about to head for its
    /// second.
    pub fn new(id: BusId, name: impl Into<String>, route: &Route) -> Self {
        Self {
            id,
            name:              name.into(),
            seat_capacity:     DEFAULT_SEATS,
            standing_capacity: DEFAULT_STANDING,
            route:             route.id(),
            next_stop_index:   1,
            passengers:        Vec::new(),
            distance:          0.0,
            leg:               Leg::Dwelling { stop: route.origin(), since: SimTime::ZERO },
            boarded_total:     0,
            alighted_total:    0,
        }
    }

    pub fn with_capacity(mut self, seats: usize, standing: usize) -> Self {
        self.seat_capacity = seats;
        self.standing_capacity = standing;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn route(&self) -> RouteId {
        self.route
    }

    #[inline]
    pub fn next_stop_index(&self) -> usize {
        self.next_stop_index
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.seat_capacity + self.standing_capacity
    }

    #[inline]
    pub fn occupancy(&self) -> usize {
        self.passengers.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupancy() >= self.capacity()
    }

    pub fn passengers(&self) -> &[PersonId] {
        &self.passengers
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn leg(&self) -> Leg {
        self.leg
    }

    pub fn boarded_total(&self) -> usize {
        self.boarded_total
    }

    pub fn alighted_total(&self) -> usize {
        self.alighted_total
    }

    /// `true` if the bus's route stops at `stop`.
    pub fn goes_to(&self, route: &Route, stop: StopId) -> bool {
        route.id() == self.route && route.goes_to(stop)
    }

    /// Switch to `route`, heading for its second stop.
    ///
    /// Only meaningful while the bus is at a stop shared by both routes'
    /// origins (the depot).
    pub fn reassign(&mut self, route: &Route) {
        self.route = route.id();
        self.next_stop_index = 1;
    }

    /// Where the bus is at `now`.
    pub fn position(&self, route: &Route, now: SimTime) -> BusPosition {
        BusPosition {
            bus:        self.id,
            route:      self.route,
            last_stop:  self.leg.last_stop(),
            next_stop:  route.stop_at(self.next_stop_index),
            in_transit: self.leg.in_transit(),
            progress:   self.leg.progress(now),
            occupancy:  self.occupancy(),
        }
    }

    // ── Event handlers ────────────────────────────────────────────────────

    /// Pull into `stop` at `time`.
    ///
    /// Advances the stop index and lets off every rider bound for `stop`.
    /// Returns the departure event for the same stop and instant.
    pub fn arrive(
        &mut self,
        route:  &Route,
        stop:   &BusStop,
        time:   SimTime,
        people: &mut PersonStore,
    ) -> FleetResult<Event> {
        self.check_route(route)?;
        self.next_stop_index = route.next_index(self.next_stop_index);
        self.leg = Leg::Dwelling { stop: stop.id, since: time };

        let mut i = 0;
        while i < self.passengers.len() {
            let rider = people.get_mut(self.passengers[i])?;
            if rider.destination == stop.id {
                rider.alight(time)?;
                trace!(bus = %self.id, person = %rider.id, stop = %stop.name, "alight");
                self.passengers.remove(i);
                self.alighted_total += 1;
            } else {
                i += 1;
            }
        }

        Ok(Event::departure(time, self.id, stop.id))
    }

    /// Board waiting riders at `stop`, starting at `time`.
    ///
    /// Riders are considered in the order they arrived.  One boards if the
    /// route goes to their destination and there is room; each boarding
    /// pushes the clock on by a random delay, and riders who show up during
    /// boarding join the back of the line.  Returns when boarding finished.
    pub fn board(
        &mut self,
        route:  &Route,
        stop:   &mut BusStop,
        time:   SimTime,
        people: &mut PersonStore,
        rng:    &mut SimRng,
        model:  &TravelModel,
    ) -> FleetResult<SimTime> {
        self.check_route(route)?;
        stop.update(time, people);

        let mut now = time;
        let mut i = 0;
        while i < stop.num_waiting() && !self.is_full() {
            let id = stop.people_waiting()[i];
            let rider = people.get_mut(id)?;
            if !route.goes_to(rider.destination) {
                i += 1;
                continue;
            }
            rider.board(self.id, now)?;
            stop.remove_waiting(i);
            self.load(id)?;
            trace!(bus = %self.id, person = %id, stop = %stop.name, at = %now, "board");

            now = now + model.boarding_delay(rng);
            stop.update(now, people);
        }
        Ok(now)
    }

    /// Service `stop` and set off for the next one.
    ///
    /// `earliest` is the departure floor: if boarding finishes before it,
    /// boarding runs again from `earliest` so that anyone arriving while the
    /// bus is held can still get on.  The first `seat_capacity` riders on
    /// board sit.  Returns the arrival event at the next stop.
    #[allow(clippy::too_many_arguments)]
    pub fn depart(
        &mut self,
        route:    &Route,
        stop:     &mut BusStop,
        time:     SimTime,
        earliest: SimTime,
        people:   &mut PersonStore,
        rng:      &mut SimRng,
        model:    &TravelModel,
    ) -> FleetResult<Event> {
        self.check_route(route)?;
        let leg_distance = route.distance_to(self.next_stop_index);
        self.distance += leg_distance;
        let travel = model.travel_time(leg_distance, rng);

        let mut done = self.board(route, stop, time, people, rng, model)?;
        if done < earliest {
            done = self.board(route, stop, earliest, people, rng, model)?;
        }

        let seated = self.passengers.len().min(self.seat_capacity);
        for &id in &self.passengers[..seated] {
            people.get_mut(id)?.sit();
        }

        let next = route.stop_at(self.next_stop_index);
        let arrives = done + travel;
        self.leg = Leg::Travelling { from: stop.id, to: next, departed: done, arrives };
        Ok(Event::arrival(arrives, self.id, next))
    }

    /// Put a rider on board.
    ///
    /// # Errors
    /// [`FleetError::OverCapacity`] if the bus is already full.
    pub fn load(&mut self, id: PersonId) -> FleetResult<()> {
        if self.is_full() {
            return Err(FleetError::OverCapacity { bus: self.id, capacity: self.capacity() });
        }
        self.passengers.push(id);
        self.boarded_total += 1;
        Ok(())
    }

    fn check_route(&self, route: &Route) -> FleetResult<()> {
        if route.id() != self.route {
            return Err(FleetError::WrongRoute { bus: self.id, expected: self.route, got: route.id() });
        }
        Ok(())
    }
}
