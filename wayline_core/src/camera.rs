//! Follow-camera pose derivation.
//!
//! Pure: the follower holds no state and may be called every tick. The
//! camera trails the agent along the reverse of its heading, looking at
//! the agent's position.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use wayline_env::{AgentId, CameraUpdate};

use crate::driver::ease_in_out;
use crate::motion::Pose;

/// Camera shaping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Trailing distance behind the agent, in scene units
    pub follow_distance: f64,

    /// Extra yaw offset from directly-behind, in radians
    pub follow_angle_offset: f64,

    /// Downward pitch in radians; also sets the camera's elevation
    pub pitch: f64,

    /// Map-style zoom level passed through to the sink
    pub zoom: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_distance: 4.0,
            follow_angle_offset: 0.0,
            pitch: 45.0_f64.to_radians(),
            zoom: 17.0,
        }
    }
}

/// A derived camera pose, read-only for the render sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera position
    pub position: Vector3<f64>,

    /// Look-at target (the agent's position)
    pub target: Vector3<f64>,

    /// Zoom level
    pub zoom: f64,

    /// Downward pitch in radians
    pub pitch: f64,
}

impl CameraPose {
    /// Flattens the camera pose into the wire form a render sink accepts.
    pub fn to_update(&self, agent_id: AgentId) -> CameraUpdate {
        CameraUpdate {
            agent_id,
            x: self.position.x,
            y: self.position.y,
            z: self.position.z,
            target_x: self.target.x,
            target_y: self.target.y,
            target_z: self.target.z,
            zoom: self.zoom,
            pitch: self.pitch,
        }
    }
}

/// Derives the trailing camera pose for the given agent pose.
///
/// The camera sits `follow_distance` behind the agent along the reverse of
/// its heading (plus `follow_angle_offset`), elevated so that looking down
/// by `pitch` centers the agent.
pub fn follow(pose: &Pose, cfg: &CameraConfig) -> CameraPose {
    let back = pose.heading + PI + cfg.follow_angle_offset;
    let offset = Vector3::new(
        back.sin() * cfg.follow_distance,
        cfg.follow_distance * cfg.pitch.tan(),
        back.cos() * cfg.follow_distance,
    );

    CameraPose {
        position: pose.position + offset,
        target: pose.position,
        zoom: cfg.zoom,
        pitch: cfg.pitch,
    }
}

/// Caller-side zoom policy: wider zoom near the start and end of a route.
///
/// The engine treats endpoint zoom easing as a host decision, not a
/// follower invariant; this helper implements the common choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRamp {
    /// Zoom level used through the middle of the route
    pub base: f64,

    /// Wider (smaller) zoom level at the endpoints
    pub wide: f64,

    /// Fraction of the route over which to blend at each end, in (0, 0.5]
    pub edge: f64,
}

impl ZoomRamp {
    /// Zoom at progress `t`, blending smoothly out of and into `wide`.
    pub fn zoom_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let edge = self.edge.clamp(1e-9, 0.5);

        let s = if t < edge {
            t / edge
        } else if t > 1.0 - edge {
            (1.0 - t) / edge
        } else {
            return self.base;
        };

        self.wide + (self.base - self.wide) * ease_in_out(s)
    }
}
