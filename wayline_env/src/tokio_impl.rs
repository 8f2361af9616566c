//! Production implementation of FrameClock using Tokio.

use crate::FrameClock;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Production frame clock backed by Tokio timers.
///
/// Approximates a display refresh loop by sleeping one nominal frame
/// interval per `next_frame()` call. Elapsed time is still measured from
/// the real monotonic clock, so a late wakeup simply produces a larger
/// frame delta rather than slowing the animation down.
pub struct TokioFrameClock {
    /// Start time for monotonic duration calculations
    start: Instant,

    /// Nominal interval between frames
    frame_interval: Duration,
}

impl TokioFrameClock {
    /// Creates a clock at the given nominal refresh rate.
    pub fn new(fps: u32) -> Self {
        Self {
            start: Instant::now(),
            frame_interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
        }
    }

    /// Creates an Arc-wrapped 60 Hz clock for sharing across tasks.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the nominal frame interval.
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }
}

impl Default for TokioFrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

#[async_trait]
impl FrameClock for TokioFrameClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    async fn next_frame(&self) -> Duration {
        tokio::time::sleep(self.frame_interval).await;
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frame_clock_advances() {
        let clock = TokioFrameClock::new(100);
        let t1 = clock.now();
        let t2 = clock.next_frame().await;

        assert!(t2 > t1);
        assert!(t2 - t1 >= Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_frame_clock_monotonic() {
        let clock = TokioFrameClock::new(200);
        let mut last = clock.now();
        for _ in 0..3 {
            let now = clock.next_frame().await;
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_frame_interval() {
        let clock = TokioFrameClock::new(50);
        assert_eq!(clock.frame_interval(), Duration::from_millis(20));
    }
}
