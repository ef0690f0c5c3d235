use thiserror::Error;

use bus_core::{BusId, CoreError, RouteId, SimTime, StopId};
use bus_fleet::FleetError;
use bus_network::NetworkError;
use bus_schedule::EventKind;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("no buses: the event queue would start empty")]
    NoBuses,

    #[error("bus allocation has {got} entries but the network has {routes} routes")]
    AllocationMismatch { routes: usize, got: usize },

    #[error("event queue ran dry at {now} before the horizon {horizon}")]
    QueueExhausted { now: SimTime, horizon: SimTime },

    #[error("stale {kind} event at {time} for bus {bus} / stop {stop}: {reason}")]
    StaleEvent {
        time:   SimTime,
        bus:    BusId,
        stop:   StopId,
        kind:   EventKind,
        reason: &'static str,
    },

    #[error("bus {bus} cannot switch to route {route}: it does not start at the depot")]
    RerouteOffDepot { bus: BusId, route: RouteId },

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
