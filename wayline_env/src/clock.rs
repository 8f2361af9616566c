//! Frame scheduling abstraction for the animation driver.

use async_trait::async_trait;
use std::time::Duration;

/// The central interface for frame scheduling.
///
/// This trait abstracts the host's display loop so the animation driver can
/// run against a real refresh cycle in production and a virtual clock in
/// simulation.
///
/// # Implementations
///
/// - **Production**: `TokioFrameClock` - wraps `tokio::time::sleep` at a
///   nominal refresh rate
/// - **Simulation**: `SimClock` (in `wayline_sim`) - virtual time advanced
///   by a seeded amount per frame
///
/// # Determinism
///
/// The driver measures elapsed time between the values returned by
/// `next_frame()`, never from the OS clock directly, so total traversal
/// time is independent of how the frames are actually paced.
#[async_trait]
pub trait FrameClock: Send + Sync + 'static {
    /// Returns the current monotonic time since clock creation.
    ///
    /// In simulation, this is the virtual clock time.
    fn now(&self) -> Duration;

    /// Suspends until the next frame is due and returns the new time.
    ///
    /// In production: sleeps one refresh interval.
    /// In simulation: advances the virtual clock and returns immediately.
    ///
    /// The returned value is monotonically non-decreasing across calls.
    async fn next_frame(&self) -> Duration;
}
