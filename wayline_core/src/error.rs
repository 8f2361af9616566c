//! Error types for the route animation engine.

use thiserror::Error;
use wayline_env::EnvError;

/// Errors surfaced at path construction or animation start.
///
/// Once an animation is running, the tick loop itself cannot fail - all
/// validation happens here, up front.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Geographic input outside valid lat/lng ranges
    #[error("Coordinates out of range: lat={lat}, lng={lng}")]
    InvalidRange { lat: f64, lng: f64 },

    /// Path built from fewer than 2 usable waypoints
    #[error("Route needs at least 2 distinct waypoints, got {got}")]
    InsufficientPoints { got: usize },

    /// Bad resample count or malformed configuration
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Propagated unchanged from the routing collaborator
    #[error(transparent)]
    RouteUnavailable(#[from] EnvError),
}

impl RouteError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
