//! Wayline Deterministic Simulation Harness
//!
//! Runs the route animation engine against a fully controlled environment
//! so that every frame of every run is reproducible from a 64-bit seed:
//! - **Time**: a virtual frame clock with seeded per-frame jitter
//! - **Output**: a recording sink that captures every pose/camera update
//! - **Routes**: canned waypoint lists per scenario
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      ScenarioRunner                        │
//! │  ┌──────────┐    step()    ┌─────────────────────────┐    │
//! │  │ SimClock │ ───────────► │ AnimationDriver (core)  │    │
//! │  │ seed=N   │              └───────────┬─────────────┘    │
//! │  └──────────┘                          │ pose/camera      │
//! │                               ┌────────▼────────┐          │
//! │                               │  RecordingSink  │          │
//! │                               └────────┬────────┘          │
//! │                          invariant checks / JSON export    │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use wayline_sim::{ScenarioRunner, scenarios::ScenarioId};
//!
//! let result = ScenarioRunner::new(42).run(ScenarioId::CityRoute);
//! assert!(result.passed);
//! ```

mod clock;
mod sink;
mod runner;
mod exporter;
pub mod scenarios;

pub use clock::SimClock;
pub use sink::RecordingSink;
pub use runner::{ScenarioResult, ScenarioRunner};
pub use exporter::{PoseFrame, SimExport};
