//! Recording sink for invariant checks and export.

use std::sync::{Arc, Mutex};
use wayline_env::{CameraUpdate, PoseUpdate, RenderSink};

/// A render sink that records every update it receives.
///
/// Clones share the same buffers, so a clone can be handed to the driver
/// while the original is kept for inspection afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    poses: Arc<Mutex<Vec<PoseUpdate>>>,
    cameras: Arc<Mutex<Vec<CameraUpdate>>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded pose updates, in arrival order.
    pub fn poses(&self) -> Vec<PoseUpdate> {
        self.poses.lock().unwrap().clone()
    }

    /// All recorded camera updates, in arrival order.
    pub fn cameras(&self) -> Vec<CameraUpdate> {
        self.cameras.lock().unwrap().clone()
    }

    /// Number of pose updates recorded.
    pub fn pose_count(&self) -> usize {
        self.poses.lock().unwrap().len()
    }

    /// The most recent pose update, if any.
    pub fn last_pose(&self) -> Option<PoseUpdate> {
        self.poses.lock().unwrap().last().copied()
    }

    /// True if recorded progress never decreases.
    pub fn progress_monotonic(&self) -> bool {
        let poses = self.poses.lock().unwrap();
        poses.windows(2).all(|w| w[1].progress >= w[0].progress)
    }

    /// True if every recorded field is finite (no NaN/inf leaked out).
    pub fn all_finite(&self) -> bool {
        let poses = self.poses.lock().unwrap();
        poses.iter().all(|p| {
            p.x.is_finite()
                && p.y.is_finite()
                && p.z.is_finite()
                && p.heading.is_finite()
                && p.tilt.is_finite()
                && p.progress.is_finite()
        })
    }
}

impl RenderSink for RecordingSink {
    fn update_pose(&mut self, update: PoseUpdate) {
        self.poses.lock().unwrap().push(update);
    }

    fn update_camera(&mut self, update: CameraUpdate) {
        self.cameras.lock().unwrap().push(update);
    }
}
