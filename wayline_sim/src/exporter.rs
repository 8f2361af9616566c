//! JSON exporter for scenario runs.
//!
//! Writes the recorded pose stream as JSON so external tooling can
//! replay a traversal.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use wayline_env::PoseUpdate;

use crate::runner::ScenarioResult;

/// A single emitted pose, paired with its frame index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseFrame {
    pub frame: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub heading: f64,
    pub tilt: f64,
    pub progress: f64,
}

impl PoseFrame {
    pub fn new(frame: u64, pose: &PoseUpdate) -> Self {
        Self {
            frame,
            x: pose.x,
            y: pose.y,
            z: pose.z,
            heading: pose.heading,
            tilt: pose.tilt,
            progress: pose.progress,
        }
    }
}

/// Complete export of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Scenario name
    pub scenario: String,

    /// Seed used
    pub seed: u64,

    /// Whether the run's invariant checks passed
    pub passed: bool,

    /// Progress at the last emitted frame
    pub final_progress: f64,

    /// Recorded pose stream
    pub frames: Vec<PoseFrame>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl SimExport {
    /// Builds an export from a finished scenario run.
    pub fn from_result(result: &ScenarioResult) -> Self {
        let frames = result
            .poses
            .iter()
            .enumerate()
            .map(|(i, pose)| PoseFrame::new(i as u64, pose))
            .collect();
        Self {
            scenario: result.scenario.name().to_string(),
            seed: result.seed,
            passed: result.passed,
            final_progress: result.final_progress,
            frames,
            failure_reason: result.failure_reason.clone(),
        }
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
