//! Network-subsystem error type.

use thiserror::Error;

use bus_core::{PersonId, RouteId, StopId};
use bus_schedule::ScheduleError;

/// Errors produced by `bus-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("route {route} has {stops} stops but {distances} distances (expected {})", stops.saturating_sub(1))]
    DistanceCountMismatch {
        route:     RouteId,
        stops:     usize,
        distances: usize,
    },

    #[error("route {route} needs at least 2 stops, got {stops}")]
    RouteTooShort { route: RouteId, stops: usize },

    #[error("route {route} distance #{position} is {value}: must be finite and non-negative")]
    InvalidDistance {
        route:    RouteId,
        position: usize,
        value:    f64,
    },

    #[error("route {route} starts at stop {first} but ends at stop {last}; routes must close on their first stop")]
    RouteNotClosed {
        route: RouteId,
        first: StopId,
        last:  StopId,
    },

    #[error("route {0} is defined twice")]
    DuplicateRoute(RouteId),

    #[error("route {0} not found")]
    RouteNotFound(RouteId),

    #[error("stop name {0:?} is used twice")]
    DuplicateStop(String),

    #[error("no stop named {0:?}")]
    UnknownStop(String),

    #[error("stop {0} not found")]
    StopNotFound(StopId),

    #[error("riders at {0:?} cannot travel to the stop they are at")]
    SelfLoop(String),

    #[error("person {0} not found")]
    PersonNotFound(PersonId),

    #[error("person {0} has already boarded a bus")]
    AlreadyBoarded(PersonId),

    #[error("person {0} is not on a bus")]
    NotOnboard(PersonId),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
