//! Wayline Core - Route Animation Engine
//!
//! This library turns an ordered list of geographic waypoints into smooth,
//! frame-rate-independent motion of an agent along the route:
//! 1. **Projection**: lat/lng to local scene coordinates and back
//! 2. **Path**: an interpolating Catmull-Rom curve through the waypoints
//! 3. **Motion**: position, heading, and bank angle at any progress value
//! 4. **Driver**: a time-based state machine that advances progress per frame
//! 5. **Camera**: a trailing follow-camera pose derived from the agent pose

pub mod projection;
pub mod path;
pub mod motion;
pub mod driver;
pub mod camera;
pub mod error;

// Re-export key types for convenience
pub use projection::Projection;
pub use path::{PathStyle, RoutePath};
pub use motion::{Pose, TiltConfig};
pub use driver::{AnimationDriver, AnimationState, DriverConfig, Easing, Phase, TickOutcome};
pub use camera::{CameraConfig, CameraPose, ZoomRamp};
pub use error::RouteError;
