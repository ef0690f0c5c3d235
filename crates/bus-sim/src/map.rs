//! The `Map` engine and its event loop.

use tracing::{debug, info};

use bus_core::{SimConfig, SimRng, SimTime, StopId};
use bus_fleet::{Bus, BusPosition, Leg, TravelModel};
use bus_network::{PersonStore, TransitNetwork};
use bus_policy::{DeparturePolicy, KeepRoute, NoDelay, PolicyContext, ReroutePolicy};
use bus_schedule::{Event, EventKind, EventQueue};

use crate::{EventRecord, RunSummary, SimError, SimObserver, SimResult};

/// The simulation engine.
///
/// `Map` owns every stop, route, bus, and rider plus the pending-event
/// queue, and drives the loop:
///
/// ```text
/// seed one departure per bus at t = 0 (once)
/// while the earliest pending event is due at or before the horizon:
///   pop it                       (FIFO among equal times)
///   clock ← event.time
///   dispatch to its bus          → exactly one successor event
///   push the successor
/// ```
///
/// Dispatch is strictly sequential; all cross-entity mutation happens inside
/// [`step`](Self::step).  The first event past the horizon stays queued, so
/// a later call with a larger horizon resumes where this one stopped.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Map<P: ReroutePolicy = KeepRoute, D: DeparturePolicy = NoDelay> {
    pub config:  SimConfig,
    pub network: TransitNetwork,
    /// Every bus, indexed by `BusId`.
    pub buses:   Vec<Bus>,

    pub(crate) people:        PersonStore,
    pub(crate) queue:         EventQueue,
    pub(crate) rng:           SimRng,
    pub(crate) model:         TravelModel,
    pub(crate) reroute:       P,
    pub(crate) departure:     D,
    pub(crate) now:           SimTime,
    pub(crate) seeded:        bool,
    pub(crate) dispatched:    u64,
    pub(crate) log:           Vec<EventRecord>,
    /// Number of snapshots already emitted.
    pub(crate) snapshots_out: u64,
}

impl<P: ReroutePolicy, D: DeparturePolicy> Map<P, D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run to `config.horizon`.
    pub fn simulate<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        self.simulate_until(self.config.horizon, observer)
    }

    /// Dispatch every event due at or before `horizon`.
    ///
    /// Snapshots are emitted up to and including `horizon`, then
    /// `on_sim_end` is called.
    pub fn simulate_until<O: SimObserver>(
        &mut self,
        horizon:  SimTime,
        observer: &mut O,
    ) -> SimResult<RunSummary> {
        self.seed_departures()?;
        info!(now = %self.now, horizon = %horizon, buses = self.buses.len(), "simulation start");
        observer.on_sim_start(self.now, horizon);

        let before = self.dispatched;
        while self.step(horizon, observer)?.is_some() {}
        self.emit_snapshots(horizon, true, observer);

        observer.on_sim_end(self.now, &self.people, &self.buses);
        let summary = RunSummary {
            dispatched: self.dispatched - before,
            final_time: self.now,
            pending:    self.queue.len(),
        };
        info!(
            dispatched = summary.dispatched,
            final_time = %summary.final_time,
            riders = self.people.len(),
            "simulation end"
        );
        Ok(summary)
    }

    /// Dispatch the next event if it is due at or before `horizon`.
    ///
    /// Returns `Ok(None)` once the next event lies beyond the horizon.
    pub fn step<O: SimObserver>(
        &mut self,
        horizon:  SimTime,
        observer: &mut O,
    ) -> SimResult<Option<EventRecord>> {
        self.seed_departures()?;
        let exhausted = SimError::QueueExhausted { now: self.now, horizon };
        let next = self.queue.peek_time().ok_or(exhausted)?;
        if next > horizon {
            return Ok(None);
        }
        self.emit_snapshots(next, false, observer);

        let event = self
            .queue
            .pop_next()
            .ok_or(SimError::QueueExhausted { now: self.now, horizon })?;
        self.now = event.time;
        let (record, successor) = self.dispatch(event)?;
        self.queue.push(successor);
        self.dispatched += 1;

        debug!(
            time = %record.time,
            bus = %record.bus,
            stop = %record.stop,
            kind = %record.kind,
            queue = self.queue.len(),
            "dispatch"
        );
        observer.on_dispatch(&record);
        if self.config.record_events {
            self.log.push(record.clone());
        }
        Ok(Some(record))
    }

    /// Queue an extra event, e.g. to replay part of a recorded run.
    ///
    /// The event is validated when it is dispatched, not here.
    pub fn schedule(&mut self, event: Event) {
        self.queue.push(event);
    }

    // ── Queryable state ───────────────────────────────────────────────────

    /// Time of the most recently dispatched event.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Events dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn people(&self) -> &PersonStore {
        &self.people
    }

    /// Every dispatched event, if `config.record_events` is set.
    pub fn event_log(&self) -> &[EventRecord] {
        &self.log
    }

    /// Pending events in dispatch order.
    pub fn pending(&self) -> impl Iterator<Item = &Event> + '_ {
        self.queue.iter()
    }

    /// Where every bus is at the current clock.
    pub fn bus_positions(&self) -> SimResult<Vec<BusPosition>> {
        self.bus_positions_at(self.now)
    }

    /// Where every bus is at `time`, interpolating legs in progress.
    pub fn bus_positions_at(&self, time: SimTime) -> SimResult<Vec<BusPosition>> {
        self.buses
            .iter()
            .map(|bus| -> SimResult<BusPosition> {
                Ok(bus.position(self.network.route(bus.route())?, time))
            })
            .collect()
    }

    /// Riders waiting at each stop at the current clock, including those
    /// due to have arrived but not yet materialized.
    pub fn stop_waiting(&self) -> Vec<(StopId, usize)> {
        self.network.stops.iter().map(|s| (s.id, s.waiting_at(self.now))).collect()
    }

    // ── Event loop internals ──────────────────────────────────────────────

    fn seed_departures(&mut self) -> SimResult<()> {
        if self.seeded {
            return Ok(());
        }
        for bus in &self.buses {
            let origin = self.network.route(bus.route())?.origin();
            self.queue.push(Event::departure(SimTime::ZERO, bus.id, origin));
        }
        self.seeded = true;
        Ok(())
    }

    /// Emit pending snapshots at `k * interval` for every boundary before
    /// `until` (or at it, if `inclusive`).
    fn emit_snapshots<O: SimObserver>(&mut self, until: SimTime, inclusive: bool, observer: &mut O) {
        if !self.config.snapshots_enabled() {
            return;
        }
        loop {
            let at = SimTime::from_minutes(self.snapshots_out as f64 * self.config.snapshot_interval_mins);
            let due = if inclusive { at <= until } else { at < until };
            if !due {
                break;
            }
            observer.on_snapshot(at, &self.network, &self.buses);
            self.snapshots_out += 1;
        }
    }

    fn dispatch(&mut self, event: Event) -> SimResult<(EventRecord, Event)> {
        let stale = |reason| SimError::StaleEvent {
            time: event.time,
            bus: event.bus,
            stop: event.stop,
            kind: event.kind,
            reason,
        };
        let bi = event.bus.index();
        let si = event.stop.index();
        if bi >= self.buses.len() {
            return Err(stale("no such bus"));
        }
        if si >= self.network.stops.len() {
            return Err(stale("no such stop"));
        }

        let (boarded, alighted, successor) = match event.kind {
            EventKind::Arrival => {
                let bus = &mut self.buses[bi];
                let route = self.network.routes.get(bus.route())?;
                if route.stop_at(bus.next_stop_index()) != event.stop {
                    return Err(stale("arrival stop is not the bus's next stop"));
                }
                let before = bus.alighted_total();
                let successor = bus.arrive(route, &self.network.stops[si], event.time, &mut self.people)?;
                let alighted = bus.alighted_total() - before;

                if self.network.is_depot(event.stop) {
                    self.consider_reroute(bi, event.time)?;
                }
                (0, alighted, successor)
            }
            EventKind::Departure => {
                if !matches!(self.buses[bi].leg(), Leg::Dwelling { stop, .. } if stop == event.stop) {
                    return Err(stale("bus is not at the departure stop"));
                }
                let ctx = PolicyContext::new(event.time, &self.network, &self.buses, &self.people);
                let delay = self
                    .departure
                    .departure_delay(&self.buses[bi], &self.network.stops[si], &ctx);
                let earliest = event.time + if delay.is_finite() && delay > 0.0 { delay } else { 0.0 };

                let bus = &mut self.buses[bi];
                let route = self.network.routes.get(bus.route())?;
                let before = bus.boarded_total();
                let successor = bus.depart(
                    route,
                    &mut self.network.stops[si],
                    event.time,
                    earliest,
                    &mut self.people,
                    &mut self.rng,
                    &self.model,
                )?;
                (bus.boarded_total() - before, 0, successor)
            }
        };

        let bus = &self.buses[bi];
        let record = EventRecord {
            seq:            self.dispatched,
            time:           event.time,
            bus:            event.bus,
            route:          bus.route(),
            stop:           event.stop,
            kind:           event.kind,
            occupancy:      bus.occupancy(),
            boarded,
            alighted,
            waiting:        self.network.stops[si].num_waiting(),
            successor_time: successor.time,
        };
        Ok((record, successor))
    }

    /// Ask the reroute policy about bus `bi`, which has just arrived at the
    /// depot, and apply its answer.
    fn consider_reroute(&mut self, bi: usize, now: SimTime) -> SimResult<()> {
        let ctx = PolicyContext::new(now, &self.network, &self.buses, &self.people);
        let Some(target) = self.reroute.reroute(&self.buses[bi], &ctx) else {
            return Ok(());
        };
        let route = self.network.route(target)?;
        let bus = &mut self.buses[bi];
        if !self.network.is_depot(route.origin()) {
            return Err(SimError::RerouteOffDepot { bus: bus.id, route: target });
        }
        info!(bus = %bus.name, from = %bus.route(), to = %target, at = %now, "reroute");
        bus.reassign(route);
        Ok(())
    }
}
