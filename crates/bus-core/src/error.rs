//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so a configuration problem detected here surfaces
//! unchanged at the top of the stack.

use thiserror::Error;

/// Errors raised by `bus-core` primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid simulated time {0}: must be finite")]
    NonFiniteTime(f64),
}

/// Shorthand result type for `bus-core`.
pub type CoreResult<T> = Result<T, CoreError>;
