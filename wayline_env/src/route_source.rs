//! Routing collaborator abstraction.

use async_trait::async_trait;
use crate::error::EnvError;
use crate::types::GeoPoint;

/// Abstraction for the external routing service.
///
/// # Implementations
///
/// - **Production**: wraps a directions/geocoding HTTP API
/// - **Simulation**: returns canned waypoint lists per scenario
///
/// # Failure policy
///
/// Failures (no route found, network failure) are surfaced unchanged to the
/// caller as [`EnvError`]; the engine never retries internally and never
/// substitutes a degenerate route.
#[async_trait]
pub trait RouteSource: Send + Sync + 'static {
    /// Fetches an ordered waypoint list from `origin` to `destination`.
    ///
    /// # Returns
    /// * `Ok(points)` - at least the origin and destination, in travel order
    /// * `Err(EnvError::RouteUnavailable)` - the backend found no route
    /// * `Err(EnvError::Network)` - the backend could not be reached
    async fn route(&self, origin: GeoPoint, destination: GeoPoint)
        -> Result<Vec<GeoPoint>, EnvError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the straight two-point route, or fails on demand.
    struct CannedRoutes {
        fail: bool,
    }

    #[async_trait]
    impl RouteSource for CannedRoutes {
        async fn route(
            &self,
            origin: GeoPoint,
            destination: GeoPoint,
        ) -> Result<Vec<GeoPoint>, EnvError> {
            if self.fail {
                return Err(EnvError::unavailable("no route between endpoints"));
            }
            Ok(vec![origin, destination])
        }
    }

    #[tokio::test]
    async fn test_canned_route_in_travel_order() {
        let source = CannedRoutes { fail: false };
        let a = GeoPoint::new(28.6139, 77.209);
        let b = GeoPoint::new(28.7041, 77.1025);

        let route = source.route(a, b).await.unwrap();
        assert_eq!(route.first(), Some(&a));
        assert_eq!(route.last(), Some(&b));
    }

    #[tokio::test]
    async fn test_failure_surfaces_unchanged() {
        let source = CannedRoutes { fail: true };
        let a = GeoPoint::new(0.0, 0.0);

        let err = source.route(a, a).await.unwrap_err();
        assert!(matches!(err, EnvError::RouteUnavailable(_)));
    }
}
