//! Error types for bus-output.

use thiserror::Error;

use bus_network::NetworkError;

/// Errors that can occur when writing simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("network lookup failed while writing output: {0}")]
    Network(#[from] NetworkError),

    #[error("output already finished; further records were dropped")]
    Closed,
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
