//! Route path fitting.
//!
//! Fits an interpolating Catmull-Rom curve through the projected waypoints,
//! so the animated agent visibly follows the actual route instead of a
//! smoothed deviation from it. Parametrization is uniform per segment
//! index, not arc length: traversal speed visually varies with segment
//! length, matching the observed behavior this engine reproduces.

use nalgebra::Vector3;

use crate::error::RouteError;

/// Consecutive waypoints closer than this are filtered at build time to
/// avoid zero-length tangent segments.
pub const DEDUP_EPSILON: f64 = 1e-6;

/// Curve style for two-point routes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PathStyle {
    /// Straight segment between the two points
    #[default]
    Direct,

    /// Cubic Bezier bend raised by `lift` scene units at the controls,
    /// for the "hop" look some hosts want on point-to-point moves.
    /// Routes with more than two waypoints ignore this and use the
    /// Catmull-Rom fit.
    Lifted { lift: f64 },
}

/// A continuous curve through an ordered waypoint sequence.
///
/// Invariants:
/// - `point_at(0.0)` equals the first waypoint and `point_at(1.0)` the last
/// - `point_at` is continuous in t and passes through every waypoint
/// - waypoint order is never changed; only near-duplicates are dropped
#[derive(Debug, Clone)]
pub struct RoutePath {
    /// Filtered waypoints, in travel order
    points: Vec<Vector3<f64>>,

    style: PathStyle,
}

impl RoutePath {
    /// Builds a path through `waypoints` with the default (direct) style.
    ///
    /// # Arguments
    /// * `waypoints` - ordered scene points, at least 2 distinct ones
    pub fn build(waypoints: &[Vector3<f64>]) -> Result<Self, RouteError> {
        Self::with_style(waypoints, PathStyle::Direct)
    }

    /// Builds a path with an explicit two-point style.
    pub fn with_style(waypoints: &[Vector3<f64>], style: PathStyle) -> Result<Self, RouteError> {
        let mut points: Vec<Vector3<f64>> = Vec::with_capacity(waypoints.len());
        for &p in waypoints {
            match points.last() {
                Some(last) if (p - last).norm() < DEDUP_EPSILON => continue,
                _ => points.push(p),
            }
        }

        if points.len() < 2 {
            return Err(RouteError::InsufficientPoints { got: points.len() });
        }

        if let PathStyle::Lifted { lift } = style {
            if !lift.is_finite() || lift < 0.0 {
                return Err(RouteError::invalid_argument(format!(
                    "path lift must be non-negative, got {lift}"
                )));
            }
        }

        Ok(Self { points, style })
    }

    /// Returns the filtered waypoints in travel order.
    pub fn waypoints(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// Number of waypoints after duplicate filtering.
    pub fn waypoint_count(&self) -> usize {
        self.points.len()
    }

    /// First waypoint (start of travel).
    pub fn first(&self) -> Vector3<f64> {
        self.points[0]
    }

    /// Last waypoint (end of travel).
    pub fn last(&self) -> Vector3<f64> {
        self.points[self.points.len() - 1]
    }

    /// Position on the curve at parameter `t`, clamped to [0, 1].
    ///
    /// Endpoints are returned exactly, not through the curve evaluation.
    pub fn point_at(&self, t: f64) -> Vector3<f64> {
        if t <= 0.0 {
            return self.first();
        }
        if t >= 1.0 {
            return self.last();
        }

        if let Some((p0, c1, c2, p1)) = self.bezier_controls() {
            return bezier_point(p0, c1, c2, p1, t);
        }

        let (i, u) = self.segment(t);
        catmull_point(
            self.control(i as isize - 1),
            self.control(i as isize),
            self.control(i as isize + 1),
            self.control(i as isize + 2),
            u,
        )
    }

    /// Unit tangent (direction of travel) at parameter `t`.
    ///
    /// Defined on all of [0, 1]; degenerate derivatives fall back to the
    /// local chord direction.
    pub fn tangent_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);

        let d = if let Some((p0, c1, c2, p1)) = self.bezier_controls() {
            bezier_derivative(p0, c1, c2, p1, t)
        } else {
            let (i, u) = self.segment(t);
            catmull_derivative(
                self.control(i as isize - 1),
                self.control(i as isize),
                self.control(i as isize + 1),
                self.control(i as isize + 2),
                u,
            )
        };

        let norm = d.norm();
        if norm > 1e-12 {
            return d / norm;
        }

        // Duplicate filtering keeps chords non-zero, so this is reachable
        // only through pathological float input; fall back gracefully.
        let (i, _) = self.segment(t);
        let chord = self.control(i as isize + 1) - self.control(i as isize);
        let chord_norm = chord.norm();
        if chord_norm > 1e-12 {
            chord / chord_norm
        } else {
            Vector3::z()
        }
    }

    /// Returns `n + 1` evenly-parametrized points for polyline display.
    ///
    /// Evenly spaced in parameter, not in arc length.
    pub fn resample(&self, n: usize) -> Result<Vec<Vector3<f64>>, RouteError> {
        if n < 1 {
            return Err(RouteError::invalid_argument(
                "resample count must be at least 1",
            ));
        }
        Ok((0..=n)
            .map(|i| self.point_at(i as f64 / n as f64))
            .collect())
    }

    /// Maps global parameter t in (0, 1) to (segment index, local u).
    fn segment(&self, t: f64) -> (usize, f64) {
        let n = self.points.len() - 1;
        let scaled = t.clamp(0.0, 1.0) * n as f64;
        let i = (scaled.floor() as usize).min(n - 1);
        (i, scaled - i as f64)
    }

    /// Index-clamped control point (duplicates endpoints at the boundary).
    fn control(&self, idx: isize) -> Vector3<f64> {
        let last = self.points.len() as isize - 1;
        self.points[idx.clamp(0, last) as usize]
    }

    /// Bezier control points when the lifted two-point style applies.
    fn bezier_controls(
        &self,
    ) -> Option<(Vector3<f64>, Vector3<f64>, Vector3<f64>, Vector3<f64>)> {
        match self.style {
            PathStyle::Lifted { lift } if self.points.len() == 2 && lift > 0.0 => {
                let p0 = self.points[0];
                let p1 = self.points[1];
                let up = Vector3::y() * lift;
                let c1 = p0 + (p1 - p0) / 3.0 + up;
                let c2 = p0 + (p1 - p0) * 2.0 / 3.0 + up;
                Some((p0, c1, c2, p1))
            }
            _ => None,
        }
    }
}

/// Uniform Catmull-Rom position on the segment between p1 and p2.
fn catmull_point(
    p0: Vector3<f64>,
    p1: Vector3<f64>,
    p2: Vector3<f64>,
    p3: Vector3<f64>,
    u: f64,
) -> Vector3<f64> {
    let a = p1 * 2.0;
    let b = p2 - p0;
    let c = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let d = -p0 + p1 * 3.0 - p2 * 3.0 + p3;
    (a + b * u + c * (u * u) + d * (u * u * u)) * 0.5
}

/// Derivative of `catmull_point` with respect to u.
fn catmull_derivative(
    p0: Vector3<f64>,
    p1: Vector3<f64>,
    p2: Vector3<f64>,
    p3: Vector3<f64>,
    u: f64,
) -> Vector3<f64> {
    let b = p2 - p0;
    let c = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let d = -p0 + p1 * 3.0 - p2 * 3.0 + p3;
    (b + c * (2.0 * u) + d * (3.0 * u * u)) * 0.5
}

/// Cubic Bezier position.
fn bezier_point(
    p0: Vector3<f64>,
    c1: Vector3<f64>,
    c2: Vector3<f64>,
    p1: Vector3<f64>,
    t: f64,
) -> Vector3<f64> {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + c1 * (3.0 * mt * mt * t) + c2 * (3.0 * mt * t * t) + p1 * (t * t * t)
}

/// Derivative of `bezier_point` with respect to t.
fn bezier_derivative(
    p0: Vector3<f64>,
    c1: Vector3<f64>,
    c2: Vector3<f64>,
    p1: Vector3<f64>,
    t: f64,
) -> Vector3<f64> {
    let mt = 1.0 - t;
    (c1 - p0) * (3.0 * mt * mt) + (c2 - c1) * (6.0 * mt * t) + (p1 - c2) * (3.0 * t * t)
}
