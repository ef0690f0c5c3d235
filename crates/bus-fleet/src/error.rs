use thiserror::Error;

use bus_core::{BusId, RouteId};
use bus_network::NetworkError;

/// Errors produced by `bus-fleet`.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("bus {bus} is full ({capacity} riders)")]
    OverCapacity { bus: BusId, capacity: usize },

    #[error("bus {bus} runs route {expected} but was handed route {got}")]
    WrongRoute {
        bus:      BusId,
        expected: RouteId,
        got:      RouteId,
    },

    #[error("invalid travel model: {0}")]
    InvalidTravelModel(String),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type FleetResult<T> = Result<T, FleetError>;
