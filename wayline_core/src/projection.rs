//! Coordinate projection between geographic and scene space.
//!
//! Uses a linear equirectangular map around a fixed origin: good enough for
//! the regional extents a route animation covers, and exactly invertible,
//! so the agent's scene position can always be reported back as lat/lng.
//! Not geodesically accurate at large extents - callers needing that must
//! supply collaborator-computed projections instead.

use nalgebra::Vector3;
use wayline_env::GeoPoint;

use crate::error::RouteError;

/// Mean Earth radius in meters, used for route distance estimates.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Checks that a geographic coordinate is within valid ranges.
pub fn validate(geo: GeoPoint) -> Result<(), RouteError> {
    if !(-90.0..=90.0).contains(&geo.lat)
        || !(-180.0..=180.0).contains(&geo.lng)
        || !geo.lat.is_finite()
        || !geo.lng.is_finite()
    {
        return Err(RouteError::InvalidRange {
            lat: geo.lat,
            lng: geo.lng,
        });
    }
    Ok(())
}

/// A fixed-origin linear projection between lat/lng and scene coordinates.
///
/// Scene space is right-handed with y up:
/// `x = (lng - origin.lng) * scale`, `z = -(lat - origin.lat) * scale`.
/// Elevation (y) is not recoverable from 2D geo and projects to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Geographic point mapped to the scene origin
    pub origin: GeoPoint,

    /// Scene units per degree
    pub scale: f64,
}

impl Projection {
    /// Creates a projection centered on `origin`.
    ///
    /// # Arguments
    /// * `origin` - geographic point mapped to (0, 0, 0)
    /// * `scale` - scene units per degree, must be positive and finite
    pub fn new(origin: GeoPoint, scale: f64) -> Result<Self, RouteError> {
        validate(origin)?;
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(RouteError::invalid_argument(format!(
                "projection scale must be positive, got {scale}"
            )));
        }
        Ok(Self { origin, scale })
    }

    /// Projects a geographic point into scene coordinates.
    pub fn to_scene(&self, geo: GeoPoint) -> Result<Vector3<f64>, RouteError> {
        validate(geo)?;
        Ok(Vector3::new(
            (geo.lng - self.origin.lng) * self.scale,
            0.0,
            -(geo.lat - self.origin.lat) * self.scale,
        ))
    }

    /// Projects a scene point back to lat/lng. Exact inverse of `to_scene`
    /// for the x/z plane; elevation is dropped.
    pub fn to_geo(&self, scene: Vector3<f64>) -> GeoPoint {
        GeoPoint {
            lat: -(scene.z / self.scale) + self.origin.lat,
            lng: scene.x / self.scale + self.origin.lng,
        }
    }

    /// Projects an ordered waypoint list, failing on the first bad point.
    pub fn project_route(&self, route: &[GeoPoint]) -> Result<Vec<Vector3<f64>>, RouteError> {
        route.iter().map(|&g| self.to_scene(g)).collect()
    }
}

/// Great-circle distance between two geographic points, in meters.
///
/// Haversine formula - used only for reporting route length, never for
/// the projection itself.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Total length of a geographic waypoint sequence, in meters.
pub fn route_distance_m(route: &[GeoPoint]) -> f64 {
    route.windows(2).map(|w| haversine_m(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn delhi() -> GeoPoint {
        GeoPoint::new(28.6139, 77.209)
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let proj = Projection::new(delhi(), 100.0).unwrap();

        let points = [
            GeoPoint::new(28.7041, 77.1025),
            GeoPoint::new(-33.8688, 151.2093),
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(89.9, -179.9),
        ];

        for g in points {
            let scene = proj.to_scene(g).unwrap();
            let back = proj.to_geo(scene);
            assert_abs_diff_eq!(back.lat, g.lat, epsilon = 1e-9);
            assert_abs_diff_eq!(back.lng, g.lng, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_origin_maps_to_scene_origin() {
        let proj = Projection::new(delhi(), 100.0).unwrap();
        let scene = proj.to_scene(delhi()).unwrap();
        assert_eq!(scene, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_axes_orientation() {
        // North (increasing lat) maps to -z, east (increasing lng) to +x
        let proj = Projection::new(GeoPoint::new(0.0, 0.0), 10.0).unwrap();

        let north = proj.to_scene(GeoPoint::new(1.0, 0.0)).unwrap();
        assert!(north.z < 0.0);
        assert_eq!(north.x, 0.0);

        let east = proj.to_scene(GeoPoint::new(0.0, 1.0)).unwrap();
        assert!(east.x > 0.0);
        assert_eq!(east.z, 0.0);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let proj = Projection::new(delhi(), 100.0).unwrap();

        for bad in [
            GeoPoint::new(91.0, 0.0),
            GeoPoint::new(-90.5, 0.0),
            GeoPoint::new(0.0, 180.5),
            GeoPoint::new(f64::NAN, 0.0),
        ] {
            assert!(matches!(
                proj.to_scene(bad),
                Err(RouteError::InvalidRange { .. })
            ));
        }
    }

    #[test]
    fn test_bad_scale_rejected() {
        assert!(matches!(
            Projection::new(delhi(), 0.0),
            Err(RouteError::InvalidArgument(_))
        ));
        assert!(matches!(
            Projection::new(delhi(), -5.0),
            Err(RouteError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_haversine_known_distance() {
        // Delhi city-center to outskirts, roughly 14.7 km
        let d = haversine_m(delhi(), GeoPoint::new(28.7041, 77.1025));
        assert!((13_000.0..17_000.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_route_distance_sums_legs() {
        let route = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 2.0),
        ];
        let total = route_distance_m(&route);
        let leg = haversine_m(route[0], route[1]);
        assert_abs_diff_eq!(total, 2.0 * leg, epsilon = 1e-6);
    }
}
