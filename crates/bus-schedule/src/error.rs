use thiserror::Error;

use bus_core::{CoreError, StopId};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("arrival schedule parse error: {0}")]
    Parse(String),

    #[error("arrivals for {destination} are not ascending at position {position}")]
    Unsorted {
        destination: StopId,
        position:    usize,
    },

    #[error("invalid arrival distribution: {0}")]
    Distribution(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
