//! Fluent builder for constructing a [`Map`].

use bus_core::{BusId, RouteId, SimConfig, SimRng, SimTime};
use bus_fleet::{Bus, DEFAULT_SEATS, DEFAULT_STANDING, TravelModel, TravelParams};
use bus_network::{PersonStore, TransitNetwork};
use bus_policy::{DeparturePolicy, KeepRoute, NoDelay, ReroutePolicy};
use bus_schedule::EventQueue;

use crate::{Map, SimError, SimResult};

/// Fluent builder for [`Map<P, D>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — horizon, seed, snapshot interval
/// - [`TransitNetwork`] — stops, routes, and arrival schedules
/// - at least one bus, via [`bus`](Self::bus) or [`allocate`](Self::allocate)
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                       |
/// |--------------------------|-------------------------------|
/// | `.capacity(s, st)`       | 25 seats, 10 standing         |
/// | `.travel(p)`             | `TravelParams::default()`     |
/// | `.reroute_policy(p)`     | `KeepRoute`                   |
/// | `.departure_policy(d)`   | `NoDelay`                     |
///
/// # Example
///
/// ```rust,ignore
/// let mut map = SimBuilder::new(config, network)
///     .bus("Bus 1", RouteId(1))
///     .bus("The Kenta Bus", RouteId(2))
///     .build()?;
/// map.simulate(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: ReroutePolicy = KeepRoute, D: DeparturePolicy = NoDelay> {
    config:     SimConfig,
    network:    TransitNetwork,
    buses:      Vec<(String, RouteId)>,
    allocation: Option<Vec<usize>>,
    seats:      usize,
    standing:   usize,
    travel:     TravelParams,
    reroute:    P,
    departure:  D,
}

impl SimBuilder {
    pub fn new(config: SimConfig, network: TransitNetwork) -> Self {
        Self {
            config,
            network,
            buses:      Vec::new(),
            allocation: None,
            seats:      DEFAULT_SEATS,
            standing:   DEFAULT_STANDING,
            travel:     TravelParams::default(),
            reroute:    KeepRoute,
            departure:  NoDelay,
        }
    }
}

impl<P: ReroutePolicy, D: DeparturePolicy> SimBuilder<P, D> {
    /// Add a named bus starting on `route`.
    pub fn bus(mut self, name: impl Into<String>, route: RouteId) -> Self {
        self.buses.push((name.into(), route));
        self
    }

    /// Add `counts[i]` buses to the `i`-th route in ascending route number.
    ///
    /// `counts` must have one entry per route; checked in [`build`](Self::build).
    /// Buses added this way are named `"Route {n} Bus {k}"`.
    pub fn allocate(mut self, counts: &[usize]) -> Self {
        self.allocation = Some(counts.to_vec());
        self
    }

    /// Seats and standing room for every bus.
    pub fn capacity(mut self, seats: usize, standing: usize) -> Self {
        self.seats = seats;
        self.standing = standing;
        self
    }

    pub fn travel(mut self, params: TravelParams) -> Self {
        self.travel = params;
        self
    }

    pub fn reroute_policy<P2: ReroutePolicy>(self, reroute: P2) -> SimBuilder<P2, D> {
        SimBuilder {
            config:     self.config,
            network:    self.network,
            buses:      self.buses,
            allocation: self.allocation,
            seats:      self.seats,
            standing:   self.standing,
            travel:     self.travel,
            reroute,
            departure:  self.departure,
        }
    }

    pub fn departure_policy<D2: DeparturePolicy>(self, departure: D2) -> SimBuilder<P, D2> {
        SimBuilder {
            config:     self.config,
            network:    self.network,
            buses:      self.buses,
            allocation: self.allocation,
            seats:      self.seats,
            standing:   self.standing,
            travel:     self.travel,
            reroute:    self.reroute,
            departure,
        }
    }

    /// Validate inputs, place the buses, and return a ready-to-run [`Map`].
    pub fn build(self) -> SimResult<Map<P, D>> {
        self.config.validate()?;
        let model = TravelModel::new(self.travel)?;

        let mut plan = self.buses;
        if let Some(counts) = self.allocation {
            let routes = self.network.routes.len();
            if counts.len() != routes {
                return Err(SimError::AllocationMismatch { routes, got: counts.len() });
            }
            for (route, &n) in self.network.routes.ids().zip(&counts) {
                for k in 1..=n {
                    plan.push((format!("Route {} Bus {k}", route.0), route));
                }
            }
        }
        if plan.is_empty() {
            return Err(SimError::NoBuses);
        }

        let mut buses = Vec::with_capacity(plan.len());
        for (i, (name, route)) in plan.into_iter().enumerate() {
            let route = self.network.route(route)?;
            let id = BusId::try_from(i)
                .map_err(|_| SimError::Config(format!("too many buses ({i})")))?;
            buses.push(Bus::new(id, name, route).with_capacity(self.seats, self.standing));
        }

        Ok(Map {
            rng:           SimRng::new(self.config.seed),
            config:        self.config,
            network:       self.network,
            buses,
            people:        PersonStore::new(),
            queue:         EventQueue::new(),
            model,
            reroute:       self.reroute,
            departure:     self.departure,
            now:           SimTime::ZERO,
            seeded:        false,
            dispatched:    0,
            log:           Vec::new(),
            snapshots_out: 0,
        })
    }
}
