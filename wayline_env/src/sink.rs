//! Render sink abstraction for pose output.

use crate::types::{CameraUpdate, PoseUpdate};

/// Abstraction for whatever draws the animated agent.
///
/// # Implementations
///
/// - **Production**: a 2D map marker, a 3D model transform, or a map camera
///   call - whatever the host renders with
/// - **Simulation**: `RecordingSink` (in `wayline_sim`) captures every
///   update for invariant checks
///
/// The engine makes no assumption about how updates are drawn and never
/// reads anything back from the sink. Sink failures (a renderer panicking)
/// are the host's concern; the engine's tick loop itself cannot fail once
/// running.
pub trait RenderSink: Send {
    /// Receives the agent pose for this tick.
    fn update_pose(&mut self, update: PoseUpdate);

    /// Receives the derived camera pose for this tick.
    fn update_camera(&mut self, update: CameraUpdate);
}

/// A sink that discards all updates.
///
/// Useful for headless runs and benchmarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn update_pose(&mut self, _update: PoseUpdate) {}

    fn update_camera(&mut self, _update: CameraUpdate) {}
}
