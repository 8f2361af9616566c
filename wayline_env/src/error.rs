//! Error types for the Wayline environment abstraction.

use thiserror::Error;

/// Errors that can occur in the environment abstraction layer.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The routing backend found no route between the requested points
    #[error("Route unavailable: {0}")]
    RouteUnavailable(String),

    /// The routing backend could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Operation timed out
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl EnvError {
    /// Creates a route-unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::RouteUnavailable(msg.into())
    }

    /// Creates a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}
