//! Error types for volley

use thiserror::Error;

/// Crate-level error type
///
/// Only configuration problems surface here, and only before any work
/// begins. Per-hit probe failures are data: they travel inside
/// [`HitResult`](crate::HitResult), never through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// Attacker configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Rate that cannot pace a run (zero frequency, zero period, or an
    /// interval that truncates to zero)
    #[error("invalid rate: {0}")]
    InvalidRate(String),
}

impl Error {
    /// Configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Configuration error for a missing required field
    pub fn missing_config(field: &str) -> Self {
        Error::Config(format!("missing required field: {field}"))
    }

    /// Invalid rate error with a message
    pub fn invalid_rate(msg: impl Into<String>) -> Self {
        Error::InvalidRate(msg.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
