//! Routes and the registry that numbers them.

use std::collections::BTreeMap;

use bus_core::{RouteId, StopId};

use crate::{NetworkError, NetworkResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered stop sequence driven in a cycle.
///
/// `distances[i]` is the length (miles) of the leg from `stops[i]` to
/// `stops[i + 1]`.  A route ends where it starts (a depot loop), so the
/// last stop is the same place as the first: when a bus leaves the last stop
/// it heads for `stops[1]`, never back to `stops[0]`.
///
/// ```text
/// stops:      D ── S ── M ── Y ── D
/// index:      0    1    2    3    4
/// next_index: 1    2    3    4    1
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    id:        RouteId,
    stops:     Vec<StopId>,
    distances: Vec<f64>,
}

impl Route {
    /// # Errors
    ///
    /// - [`NetworkError::RouteTooShort`] for fewer than two stops.
    /// - [`NetworkError::DistanceCountMismatch`] unless
    ///   `distances.len() == stops.len() - 1`.
    /// - [`NetworkError::InvalidDistance`] for a negative or non-finite leg.
    /// - [`NetworkError::RouteNotClosed`] unless the last stop is the first.
    pub fn new(id: RouteId, stops: Vec<StopId>, distances: Vec<f64>) -> NetworkResult<Self> {
        if stops.len() < 2 {
            return Err(NetworkError::RouteTooShort { route: id, stops: stops.len() });
        }
        if distances.len() != stops.len() - 1 {
            return Err(NetworkError::DistanceCountMismatch {
                route:     id,
                stops:     stops.len(),
                distances: distances.len(),
            });
        }
        if let Some((position, &value)) =
            distances.iter().enumerate().find(|(_, d)| !(d.is_finite() && **d >= 0.0))
        {
            return Err(NetworkError::InvalidDistance { route: id, position, value });
        }
        let route = Self { id, stops, distances };
        if !route.is_loop() {
            return Err(NetworkError::RouteNotClosed {
                route: id,
                first: route.stops[0],
                last:  route.stops[route.stops.len() - 1],
            });
        }
        Ok(route)
    }

    #[inline]
    pub fn id(&self) -> RouteId {
        self.id
    }

    #[inline]
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    #[inline]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Number of stops, counting the closing stop of a loop.
    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always `false`; routes have at least two stops.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// First stop, where buses start the day.
    #[inline]
    pub fn origin(&self) -> StopId {
        self.stops[0]
    }

    /// `true` if the route closes on its starting stop.  Holds for every
    /// route built with [`Route::new`].
    pub fn is_loop(&self) -> bool {
        self.stops.first() == self.stops.last()
    }

    /// Stop at `index`.
    ///
    /// # Panics
    /// If `index >= self.len()`.
    #[inline]
    pub fn stop_at(&self, index: usize) -> StopId {
        self.stops[index]
    }

    /// Index a bus moves to after serving `index`.  Always in `1..len`.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        index % (self.stops.len() - 1) + 1
    }

    /// Length of the leg that ends at stop `index` (`index >= 1`).
    ///
    /// # Panics
    /// If `index == 0` or `index >= self.len()`.
    #[inline]
    pub fn distance_to(&self, index: usize) -> f64 {
        self.distances[index - 1]
    }

    /// `true` if any stop on the route is `stop`.
    pub fn goes_to(&self, stop: StopId) -> bool {
        self.stops.contains(&stop)
    }

    /// Sum of all legs.
    pub fn total_length(&self) -> f64 {
        self.distances.iter().sum()
    }
}

// ── RouteRegistry ─────────────────────────────────────────────────────────────

/// Routes keyed by number.  Iterates in ascending route number.
#[derive(Clone, Debug, Default)]
pub struct RouteRegistry {
    routes: BTreeMap<RouteId, Route>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// [`NetworkError::DuplicateRoute`] if the number is taken.
    pub fn insert(&mut self, route: Route) -> NetworkResult<()> {
        let id = route.id();
        if self.routes.contains_key(&id) {
            return Err(NetworkError::DuplicateRoute(id));
        }
        self.routes.insert(id, route);
        Ok(())
    }

    pub fn get(&self, id: RouteId) -> NetworkResult<&Route> {
        self.routes.get(&id).ok_or(NetworkError::RouteNotFound(id))
    }

    pub fn contains(&self, id: RouteId) -> bool {
        self.routes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.routes.keys().copied()
    }
}
