//! Wayline Environment Abstraction Layer
//!
//! This crate provides the "Sans-IO" abstraction allowing the Wayline route
//! animation engine to run against a real display loop (tokio) or a fully
//! deterministic simulated one.
//!
//! # Core Concept: Capability Traits
//!
//! The engine never holds a live handle to a map SDK, a renderer, or a
//! routing backend. Everything it needs from the outside world crosses one
//! of three narrow traits:
//! - Frame scheduling (`next_frame()`, `now()`) — [`FrameClock`]
//! - Pose/camera output — [`RenderSink`]
//! - Route waypoints — [`RouteSource`]
//!
//! By driving the clock from a seed-controlled virtual time source, any
//! animation run becomes reproducible tick-for-tick.
//!
//! # Example
//!
//! ```ignore
//! use wayline_env::{FrameClock, RenderSink};
//!
//! async fn animate<C: FrameClock, S: RenderSink>(clock: &C, sink: &mut S) {
//!     loop {
//!         let now = clock.next_frame().await;
//!         tick(now, sink);
//!     }
//! }
//! ```

mod clock;
mod sink;
mod route_source;
mod types;
mod error;
mod tokio_impl;

pub use clock::FrameClock;
pub use sink::{NullSink, RenderSink};
pub use route_source::RouteSource;
pub use types::{AgentId, CameraUpdate, GeoPoint, PoseUpdate};
pub use error::EnvError;
pub use tokio_impl::TokioFrameClock;
