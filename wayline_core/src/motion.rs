//! Motion sampling: pose derivation from a path and a progress value.
//!
//! Everything here is a pure function of `(path, t)`, which is what makes
//! the animation deterministic and testable at fixed parameter values.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use wayline_env::{AgentId, PoseUpdate};

use crate::path::RoutePath;

/// Parameter clamp applied before tangent evaluation, so heading stays
/// defined at the endpoint.
pub const TANGENT_END_EPSILON: f64 = 1e-4;

/// Parameter offset for the three-sample curvature estimate.
const CURVATURE_DELTA: f64 = 1e-3;

/// The agent's pose at one instant, recomputed each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Scene position
    pub position: Vector3<f64>,

    /// Yaw in radians, measured from +z toward +x
    pub heading: f64,

    /// Bank angle in radians; sign follows turn direction
    pub tilt: f64,
}

impl Pose {
    /// Flattens the pose into the wire form a render sink accepts.
    pub fn to_update(&self, agent_id: AgentId, progress: f64) -> PoseUpdate {
        PoseUpdate {
            agent_id,
            x: self.position.x,
            y: self.position.y,
            z: self.position.z,
            heading: self.heading,
            tilt: self.tilt,
            progress,
        }
    }
}

/// Curvature-to-bank mapping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltConfig {
    /// Maximum bank angle in radians
    pub limit: f64,

    /// Scene-unit gain: bank = atan(gain * curvature), then clamped
    pub gain: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            limit: 45.0_f64.to_radians(),
            gain: 1.0,
        }
    }
}

/// Position on the path at `t`, clamped to [0, 1].
pub fn position_at(path: &RoutePath, t: f64) -> Vector3<f64> {
    path.point_at(t.clamp(0.0, 1.0))
}

/// Yaw aligning the agent's forward axis with the direction of travel.
///
/// The tangent parameter is clamped to `[0, 1 - ε]` so the heading stays
/// defined when the agent reaches the endpoint.
pub fn heading_at(path: &RoutePath, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0 - TANGENT_END_EPSILON);
    let tangent = path.tangent_at(t);
    tangent.x.atan2(tangent.z)
}

/// Bank angle from local curvature.
///
/// Estimates curvature from the circumradius of the triangle formed by
/// samples at `t - δ`, `t`, `t + δ`. Collinear triples give zero tilt,
/// never a division fault.
pub fn tilt_at(path: &RoutePath, t: f64, cfg: &TiltConfig) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let a = path.point_at((t - CURVATURE_DELTA).max(0.0));
    let b = path.point_at(t);
    let c = path.point_at((t + CURVATURE_DELTA).min(1.0));

    let ab = b - a;
    let bc = c - b;
    let ac = c - a;

    let la = ab.norm();
    let lb = bc.norm();
    let lc = ac.norm();
    if la < 1e-12 || lb < 1e-12 || lc < 1e-12 {
        return 0.0;
    }

    let cross = ab.cross(&ac);
    let doubled_area = cross.norm();
    if doubled_area < 1e-15 {
        // Collinear samples: straight travel, no bank
        return 0.0;
    }

    // curvature = 1/R with circumradius R = (la * lb * lc) / (4 * area)
    let curvature = 2.0 * doubled_area / (la * lb * lc);

    // Turn direction from the y component of the travel-direction cross
    let sign = if ab.cross(&bc).y >= 0.0 { 1.0 } else { -1.0 };

    // max(0.0) also maps a NaN limit to 0, keeping the clamp well-formed
    let limit = cfg.limit.max(0.0);
    (sign * (cfg.gain * curvature).atan()).clamp(-limit, limit)
}

/// Full pose at `t`: position, heading, tilt.
pub fn sample_pose(path: &RoutePath, t: f64, cfg: &TiltConfig) -> Pose {
    Pose {
        position: position_at(path, t),
        heading: heading_at(path, t),
        tilt: tilt_at(path, t, cfg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::new(x, y, z)
    }

    fn straight_x() -> RoutePath {
        RoutePath::build(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_heading_constant_on_straight_path() {
        let path = straight_x();

        // Travel along +x means heading atan2(1, 0)
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_abs_diff_eq!(heading_at(&path, t), FRAC_PI_2, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_heading_defined_at_endpoint() {
        let path = straight_x();
        let h = heading_at(&path, 1.0);
        assert!(h.is_finite());
        assert_abs_diff_eq!(h, FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_position_clamps_parameter() {
        let path = straight_x();
        assert_eq!(position_at(&path, -3.0), path.first());
        assert_eq!(position_at(&path, 42.0), path.last());
    }

    #[test]
    fn test_tilt_zero_on_straight_path() {
        let path = straight_x();
        let cfg = TiltConfig::default();

        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_abs_diff_eq!(tilt_at(&path, t, &cfg), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_tilt_nonzero_and_clamped_on_curve() {
        // Sharp left turn in the middle
        let path = RoutePath::build(&[
            v(0.0, 0.0, 0.0),
            v(10.0, 0.0, 0.0),
            v(10.0, 0.0, 10.0),
        ])
        .unwrap();
        let cfg = TiltConfig {
            limit: 45.0_f64.to_radians(),
            gain: 50.0,
        };

        let tilt = tilt_at(&path, 0.5, &cfg);
        assert!(tilt.abs() > 0.0);
        assert!(tilt.abs() <= cfg.limit + 1e-12);
    }

    #[test]
    fn test_tilt_sign_follows_turn_direction() {
        let left = RoutePath::build(&[
            v(0.0, 0.0, 0.0),
            v(0.0, 0.0, 10.0),
            v(10.0, 0.0, 10.0),
        ])
        .unwrap();
        let right = RoutePath::build(&[
            v(0.0, 0.0, 0.0),
            v(0.0, 0.0, 10.0),
            v(-10.0, 0.0, 10.0),
        ])
        .unwrap();
        let cfg = TiltConfig {
            gain: 50.0,
            ..TiltConfig::default()
        };

        let tl = tilt_at(&left, 0.5, &cfg);
        let tr = tilt_at(&right, 0.5, &cfg);
        assert!(tl * tr < 0.0, "expected opposite signs, got {tl} and {tr}");
    }

    #[test]
    fn test_tilt_degenerate_limit_never_panics() {
        // Negative or NaN limits collapse to zero bank instead of an
        // invalid clamp range
        let path = RoutePath::build(&[
            v(0.0, 0.0, 0.0),
            v(10.0, 0.0, 0.0),
            v(10.0, 0.0, 10.0),
        ])
        .unwrap();

        let negative = TiltConfig {
            limit: -0.1,
            gain: 50.0,
        };
        assert_eq!(tilt_at(&path, 0.5, &negative), 0.0);

        let nan = TiltConfig {
            limit: f64::NAN,
            gain: 50.0,
        };
        assert_eq!(tilt_at(&path, 0.5, &nan), 0.0);
    }

    #[test]
    fn test_pose_update_wire_form() {
        let path = straight_x();
        let pose = sample_pose(&path, 0.5, &TiltConfig::default());

        let agent = AgentId::from_seed(7);
        let update = pose.to_update(agent, 0.5);
        assert_eq!(update.agent_id, agent);
        assert_eq!(update.x, pose.position.x);
        assert_eq!(update.heading, pose.heading);
        assert_eq!(update.progress, 0.5);
    }
}
