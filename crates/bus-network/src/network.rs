//! The assembled transit network and its builder.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut b = TransitNetworkBuilder::new();
//! b.add_stop("Depot")?;
//! b.add_stop("Commons")?;
//! b.add_stop("Collegetown")?;
//! b.depot("Depot")?;
//! b.add_route(1, &["Depot", "Commons", "Collegetown", "Depot"], &[0.5, 2.0, 2.0])?;
//! b.arrivals("Commons", "Collegetown", times)?;
//! let network = b.build();
//! ```
//!
//! Every builder method validates its input immediately, so a bad scenario
//! fails at the line that introduced the problem.

use rustc_hash::FxHashMap;

use bus_core::{RouteId, SimRng, SimTime, StopId};
use bus_schedule::{ArrivalGenerator, ArrivalTable};

use crate::{BusStop, NetworkError, NetworkResult, Route, RouteRegistry};

// ── TransitNetwork ────────────────────────────────────────────────────────────

/// Stops and routes for one simulation.
///
/// `stops` is indexed by `StopId`.  Stops are mutable during a run (riders
/// come and go); routes are not.
#[derive(Clone, Debug, Default)]
pub struct TransitNetwork {
    pub stops:  Vec<BusStop>,
    pub routes: RouteRegistry,

    names: FxHashMap<String, StopId>,
    depot: Option<StopId>,
}

impl TransitNetwork {
    #[inline]
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn stop(&self, id: StopId) -> NetworkResult<&BusStop> {
        self.stops.get(id.index()).ok_or(NetworkError::StopNotFound(id))
    }

    pub fn stop_mut(&mut self, id: StopId) -> NetworkResult<&mut BusStop> {
        self.stops.get_mut(id.index()).ok_or(NetworkError::StopNotFound(id))
    }

    /// Look a stop up by name.
    pub fn stop_id(&self, name: &str) -> NetworkResult<StopId> {
        self.names.get(name).copied().ok_or_else(|| NetworkError::UnknownStop(name.to_owned()))
    }

    pub fn route(&self, id: RouteId) -> NetworkResult<&Route> {
        self.routes.get(id)
    }

    /// The stop where buses may be reassigned between routes, if any.
    #[inline]
    pub fn depot(&self) -> Option<StopId> {
        self.depot
    }

    #[inline]
    pub fn is_depot(&self, stop: StopId) -> bool {
        self.depot == Some(stop)
    }

    /// Riders scheduled but not yet materialized, across all stops.
    pub fn pending_arrivals(&self) -> usize {
        self.stops.iter().map(|s| s.schedule().remaining()).sum()
    }
}

// ── TransitNetworkBuilder ─────────────────────────────────────────────────────

/// Incrementally assembles a [`TransitNetwork`].
#[derive(Default)]
pub struct TransitNetworkBuilder {
    stops:  Vec<BusStop>,
    names:  FxHashMap<String, StopId>,
    routes: RouteRegistry,
    depot:  Option<StopId>,
}

impl TransitNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named stop.  Names are trimmed and must be unique.
    pub fn add_stop(&mut self, name: &str) -> NetworkResult<StopId> {
        let name = name.trim();
        if self.names.contains_key(name) {
            return Err(NetworkError::DuplicateStop(name.to_owned()));
        }
        let id = StopId(self.stops.len() as u32);
        self.stops.push(BusStop::new(id, name));
        self.names.insert(name.to_owned(), id);
        Ok(id)
    }

    pub fn stop_id(&self, name: &str) -> NetworkResult<StopId> {
        self.names
            .get(name.trim())
            .copied()
            .ok_or_else(|| NetworkError::UnknownStop(name.to_owned()))
    }

    /// Mark an existing stop as the depot.
    pub fn depot(&mut self, name: &str) -> NetworkResult<StopId> {
        let id = self.stop_id(name)?;
        self.depot = Some(id);
        Ok(id)
    }

    /// Add route `number` over named stops.
    pub fn add_route<S: AsRef<str>>(
        &mut self,
        number: u32,
        stops: &[S],
        distances: &[f64],
    ) -> NetworkResult<RouteId> {
        let ids = stops
            .iter()
            .map(|s| self.stop_id(s.as_ref()))
            .collect::<NetworkResult<Vec<_>>>()?;
        self.add_route_by_id(number, &ids, distances)
    }

    /// Add route `number` over stop IDs already returned by
    /// [`add_stop`](Self::add_stop).
    pub fn add_route_by_id(
        &mut self,
        number: u32,
        stops: &[StopId],
        distances: &[f64],
    ) -> NetworkResult<RouteId> {
        if let Some(&bad) = stops.iter().find(|s| s.index() >= self.stops.len()) {
            return Err(NetworkError::StopNotFound(bad));
        }
        let id = RouteId(number);
        self.routes.insert(Route::new(id, stops.to_vec(), distances.to_vec())?)?;
        Ok(id)
    }

    /// Schedule riders travelling `origin → destination`, arriving at
    /// `times` (must be ascending).
    pub fn arrivals(
        &mut self,
        origin: &str,
        destination: &str,
        times: Vec<SimTime>,
    ) -> NetworkResult<()> {
        let from = self.stop_id(origin)?;
        let to = self.stop_id(destination)?;
        self.arrivals_by_id(from, to, times)
    }

    pub fn arrivals_by_id(
        &mut self,
        origin: StopId,
        destination: StopId,
        times: Vec<SimTime>,
    ) -> NetworkResult<()> {
        if destination.index() >= self.stops.len() {
            return Err(NetworkError::StopNotFound(destination));
        }
        let stop = self.stops.get_mut(origin.index()).ok_or(NetworkError::StopNotFound(origin))?;
        if origin == destination {
            return Err(NetworkError::SelfLoop(stop.name.clone()));
        }
        stop.schedule_mut().insert(destination, times)?;
        Ok(())
    }

    /// Draw arrival times for `origin → destination` from `generator`.
    ///
    /// Returns the number of riders scheduled.
    pub fn generate_arrivals<G: ArrivalGenerator + ?Sized>(
        &mut self,
        origin: &str,
        destination: &str,
        generator: &G,
        rng: &mut SimRng,
    ) -> NetworkResult<usize> {
        let times = generator.generate(rng)?;
        let n = times.len();
        self.arrivals(origin, destination, times)?;
        Ok(n)
    }

    /// Schedule every pair in a loaded [`ArrivalTable`].
    pub fn arrival_table(&mut self, table: &ArrivalTable) -> NetworkResult<()> {
        for (origin, by_destination) in table {
            for (destination, times) in by_destination {
                self.arrivals(origin, destination, times.clone())?;
            }
        }
        Ok(())
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn build(self) -> TransitNetwork {
        TransitNetwork {
            stops:  self.stops,
            routes: self.routes,
            names:  self.names,
            depot:  self.depot,
        }
    }
}
