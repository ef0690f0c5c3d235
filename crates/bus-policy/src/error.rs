use thiserror::Error;

use bus_core::RouteId;

/// Errors produced when constructing a policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("route rotation needs at least one route")]
    EmptyRotation,

    #[error("route {0} appears twice in the rotation")]
    DuplicateInRotation(RouteId),

    #[error("departure delay must be finite and non-negative, got {0}")]
    InvalidDelay(f64),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
