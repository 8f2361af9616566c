//! Animation driver: the frame-driven traversal state machine.
//!
//! The driver owns the active path and animation state exclusively. It is
//! advanced by `tick(now)` with wall-clock timestamps, so total traversal
//! time is independent of how frames are actually paced; the async `run`
//! loop just feeds it timestamps from a [`FrameClock`].
//!
//! Re-entrancy: `tick` and `start` take `&mut self`, so two concurrent
//! tick loops over one driver are unrepresentable. Cancellation from
//! another task goes through a [`CancelHandle`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use nalgebra::Vector3;
use wayline_env::{AgentId, FrameClock, RenderSink};

use crate::camera::{self, CameraConfig};
use crate::error::RouteError;
use crate::motion::{self, TiltConfig};
use crate::path::{PathStyle, RoutePath};

/// Quadratic ease-in-out over [0, 1].
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Progress-to-sampling easing policy.
///
/// Easing shapes only the curve parameter used for pose sampling; the
/// stored progress always advances linearly and monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Sample at raw progress
    #[default]
    Linear,

    /// Quadratic ease-in-out: slow start, slow arrival
    EaseInOut,
}

impl Easing {
    /// Applies the easing to a progress value in [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::EaseInOut => ease_in_out(t),
        }
    }
}

/// Driver configuration, fixed per driver instance.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// User-adjustable speed multiplier, must be positive
    pub speed_multiplier: f64,

    /// Full-traversal time at multiplier 1.0
    pub baseline_duration: Duration,

    /// Sampling easing policy
    pub easing: Easing,

    /// Two-point curve style passed to the path builder
    pub style: PathStyle,

    /// Curvature-to-bank mapping
    pub tilt: TiltConfig,

    /// Follow-camera shaping
    pub camera: CameraConfig,

    /// Whether to emit camera updates alongside pose updates
    pub emit_camera: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            // 5 s full traversal at multiplier 1.0
            baseline_duration: Duration::from_secs(5),
            easing: Easing::Linear,
            style: PathStyle::Direct,
            tilt: TiltConfig::default(),
            camera: CameraConfig::default(),
            emit_camera: true,
        }
    }
}

impl DriverConfig {
    fn validate(&self) -> Result<(), RouteError> {
        if !(self.speed_multiplier > 0.0 && self.speed_multiplier.is_finite()) {
            return Err(RouteError::invalid_argument(format!(
                "speed multiplier must be positive, got {}",
                self.speed_multiplier
            )));
        }
        if self.baseline_duration.is_zero() {
            return Err(RouteError::invalid_argument(
                "baseline duration must be non-zero",
            ));
        }
        if !(self.tilt.limit >= 0.0 && self.tilt.limit.is_finite()) {
            return Err(RouteError::invalid_argument(format!(
                "tilt limit must be non-negative, got {}",
                self.tilt.limit
            )));
        }
        if !self.tilt.gain.is_finite() {
            return Err(RouteError::invalid_argument(format!(
                "tilt gain must be finite, got {}",
                self.tilt.gain
            )));
        }
        // pitch.tan() must stay finite for the camera elevation
        if !(0.0..std::f64::consts::FRAC_PI_2).contains(&self.camera.pitch) {
            return Err(RouteError::invalid_argument(format!(
                "camera pitch must be in [0, pi/2), got {}",
                self.camera.pitch
            )));
        }
        if !self.camera.follow_distance.is_finite() {
            return Err(RouteError::invalid_argument(format!(
                "camera follow distance must be finite, got {}",
                self.camera.follow_distance
            )));
        }
        Ok(())
    }

    /// Progress advanced per second of wall-clock time.
    fn rate(&self) -> f64 {
        self.speed_multiplier / self.baseline_duration.as_secs_f64()
    }
}

/// Animation lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No path accepted yet
    Idle,

    /// Progress advancing
    Running,

    /// Reached progress 1.0; completion fired
    Completed,

    /// Stopped before completion; progress retained
    Cancelled,
}

/// The driver's owned animation state.
///
/// Created when a path is accepted, reset only by `start`, and read-only
/// from outside the driver.
#[derive(Debug, Clone)]
pub struct AnimationState {
    /// Normalized traversal progress in [0, 1]; monotone while Running
    pub progress: f64,

    /// Lifecycle phase
    pub phase: Phase,

    /// Speed multiplier captured at start
    pub speed: f64,

    /// Clock time at which the current animation started
    pub started_at: Option<Duration>,

    /// Clock time of the last processed tick
    last_tick: Option<Duration>,

    /// Guards the once-per-start completion notification
    completion_fired: bool,
}

impl AnimationState {
    fn idle() -> Self {
        Self {
            progress: 0.0,
            phase: Phase::Idle,
            speed: 1.0,
            started_at: None,
            last_tick: None,
            completion_fired: false,
        }
    }

    /// True while progress is advancing.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing to animate (idle, already completed, or already cancelled)
    Idle,

    /// Progress advanced; pose emitted
    Running { progress: f64 },

    /// This tick reached progress 1.0 and fired completion
    Completed,

    /// This tick observed a pending cancellation; nothing was emitted
    Cancelled,
}

/// Cooperative cancellation handle, sharable across tasks.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Requests cancellation; the driver observes it on its next tick.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Per-agent route animation driver.
///
/// Owns the active [`RoutePath`] and [`AnimationState`] exclusively; the
/// render sink only ever receives snapshots. One driver per animated
/// agent - agents never share a driver.
pub struct AnimationDriver<S: RenderSink> {
    /// This agent's identifier, stamped on every update
    pub agent_id: AgentId,

    config: DriverConfig,
    sink: S,
    path: Option<RoutePath>,
    state: AnimationState,
    cancel_flag: Arc<AtomicBool>,
    on_complete: Option<Box<dyn FnMut(AgentId) + Send>>,
}

impl<S: RenderSink> AnimationDriver<S> {
    /// Creates an idle driver.
    ///
    /// Fails with `InvalidArgument` on malformed configuration.
    pub fn new(agent_id: AgentId, config: DriverConfig, sink: S) -> Result<Self, RouteError> {
        config.validate()?;
        Ok(Self {
            agent_id,
            config,
            sink,
            path: None,
            state: AnimationState::idle(),
            cancel_flag: Arc::new(AtomicBool::new(false)),
            on_complete: None,
        })
    }

    /// Registers the completion notification, fired exactly once per
    /// `start` that runs to completion (never on cancel).
    pub fn set_on_complete(&mut self, callback: impl FnMut(AgentId) + Send + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Returns a handle that can cancel this driver from another task.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancel_flag),
        }
    }

    /// Read-only view of the animation state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Current progress in [0, 1].
    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    /// The active path, if a route has been accepted.
    pub fn path(&self) -> Option<&RoutePath> {
        self.path.as_ref()
    }

    /// Consumes the driver and returns its sink (for inspection in tests
    /// and harnesses).
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Accepts a route and transitions to Running.
    ///
    /// Builds the path first: on a builder error the previous path and
    /// state are left untouched. On success any in-flight animation is
    /// replaced, progress resets to 0, and the start pose is emitted.
    pub fn start(&mut self, waypoints: &[Vector3<f64>], now: Duration) -> Result<(), RouteError> {
        let path = RoutePath::with_style(waypoints, self.config.style)?;

        self.cancel_flag.store(false, Ordering::SeqCst);
        self.path = Some(path);
        self.state = AnimationState {
            progress: 0.0,
            phase: Phase::Running,
            speed: self.config.speed_multiplier,
            started_at: Some(now),
            last_tick: Some(now),
            completion_fired: false,
        };

        self.emit(0.0);
        Ok(())
    }

    /// Advances the animation to wall-clock time `now`.
    ///
    /// Elapsed time is measured from the previous tick, so the traversal
    /// duration does not depend on the frame rate. Progress is clamped to
    /// 1.0 and never decreases.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        if self.state.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        if self.cancel_flag.swap(false, Ordering::SeqCst) {
            self.state.phase = Phase::Cancelled;
            return TickOutcome::Cancelled;
        }

        let last = self.state.last_tick.unwrap_or(now);
        let dt = now.saturating_sub(last);
        self.state.last_tick = Some(now);

        let advanced = self.state.progress + dt.as_secs_f64() * self.config.rate();
        self.state.progress = advanced.min(1.0);

        self.emit(self.state.progress);

        if self.state.progress >= 1.0 {
            self.state.phase = Phase::Completed;
            if !self.state.completion_fired {
                self.state.completion_fired = true;
                if let Some(callback) = self.on_complete.as_mut() {
                    callback(self.agent_id);
                }
            }
            return TickOutcome::Completed;
        }

        TickOutcome::Running {
            progress: self.state.progress,
        }
    }

    /// Cancels a running animation in place.
    ///
    /// Progress retains its last value; the completion notification does
    /// not fire. No-op unless Running.
    pub fn cancel(&mut self) {
        if self.state.phase == Phase::Running {
            self.state.phase = Phase::Cancelled;
        }
        self.cancel_flag.store(false, Ordering::SeqCst);
    }

    /// Drives the animation to completion or cancellation on `clock`.
    ///
    /// One cooperative tick per frame; returns the final phase.
    pub async fn run<C: FrameClock>(&mut self, clock: &C) -> Phase {
        while self.state.phase == Phase::Running {
            let now = clock.next_frame().await;
            match self.tick(now) {
                TickOutcome::Running { .. } => {}
                _ => break,
            }
        }
        self.state.phase
    }

    /// Evenly-parametrized points of the active path for polyline display.
    pub fn resample_route(&self, n: usize) -> Result<Vec<Vector3<f64>>, RouteError> {
        match &self.path {
            Some(path) => path.resample(n),
            None => Err(RouteError::invalid_argument("no active path to resample")),
        }
    }

    /// Samples the pose at eased progress and pushes it to the sink.
    fn emit(&mut self, progress: f64) {
        let path = match &self.path {
            Some(path) => path,
            None => return,
        };

        let t = self.config.easing.apply(progress);
        let pose = motion::sample_pose(path, t, &self.config.tilt);
        self.sink.update_pose(pose.to_update(self.agent_id, progress));

        if self.config.emit_camera {
            let cam = camera::follow(&pose, &self.config.camera);
            self.sink.update_camera(cam.to_update(self.agent_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wayline_env::{CameraUpdate, PoseUpdate};

    fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::new(x, y, z)
    }

    /// Records every update through a clone-shared buffer.
    #[derive(Clone, Default)]
    struct TestSink {
        poses: Arc<Mutex<Vec<PoseUpdate>>>,
        cameras: Arc<Mutex<Vec<CameraUpdate>>>,
    }

    impl TestSink {
        fn poses(&self) -> Vec<PoseUpdate> {
            self.poses.lock().unwrap().clone()
        }

        fn camera_count(&self) -> usize {
            self.cameras.lock().unwrap().len()
        }
    }

    impl RenderSink for TestSink {
        fn update_pose(&mut self, update: PoseUpdate) {
            self.poses.lock().unwrap().push(update);
        }

        fn update_camera(&mut self, update: CameraUpdate) {
            self.cameras.lock().unwrap().push(update);
        }
    }

    fn driver_with_sink(config: DriverConfig) -> (AnimationDriver<TestSink>, TestSink) {
        let sink = TestSink::default();
        let driver =
            AnimationDriver::new(AgentId::from_seed(1), config, sink.clone()).unwrap();
        (driver, sink)
    }

    fn completion_counter(
        driver: &mut AnimationDriver<TestSink>,
    ) -> Arc<Mutex<u32>> {
        let counter = Arc::new(Mutex::new(0u32));
        let captured = Arc::clone(&counter);
        driver.set_on_complete(move |_| {
            *captured.lock().unwrap() += 1;
        });
        counter
    }

    #[test]
    fn test_two_point_run_to_completion() {
        let (mut driver, sink) = driver_with_sink(DriverConfig::default());
        let completions = completion_counter(&mut driver);

        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)], Duration::ZERO)
            .unwrap();
        assert_eq!(driver.phase(), Phase::Running);

        // 100ms frames at multiplier 1.0, baseline 5s: done after 5s
        let mut ticks = 0;
        loop {
            ticks += 1;
            let now = Duration::from_millis(100 * ticks);
            match driver.tick(now) {
                TickOutcome::Completed => break,
                TickOutcome::Running { progress } => assert!(progress < 1.0),
                other => panic!("unexpected outcome {other:?}"),
            }
            assert!(ticks < 100, "animation never completed");
        }

        assert_eq!(ticks, 50);
        assert_eq!(driver.phase(), Phase::Completed);
        assert_eq!(driver.progress(), 1.0);
        assert_eq!(*completions.lock().unwrap(), 1);

        // Final emitted pose is the endpoint
        let poses = sink.poses();
        let last = poses.last().unwrap();
        assert_eq!((last.x, last.y, last.z), (10.0, 0.0, 0.0));
        assert!(poses.iter().all(|p| p.progress <= 1.0));
    }

    #[test]
    fn test_progress_monotonic_under_jittery_frames() {
        let (mut driver, sink) = driver_with_sink(DriverConfig::default());
        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 10.0)], Duration::ZERO)
            .unwrap();

        // Wildly uneven frame times, including a zero-length delta
        let mut now = Duration::ZERO;
        for ms in [3u64, 40, 0, 16, 120, 1, 16, 300, 8] {
            now += Duration::from_millis(ms);
            driver.tick(now);
        }

        let poses = sink.poses();
        for pair in poses.windows(2) {
            assert!(pair[1].progress >= pair[0].progress);
        }
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let (mut driver, _sink) = driver_with_sink(DriverConfig::default());
        let completions = completion_counter(&mut driver);

        driver
            .start(&[v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)], Duration::ZERO)
            .unwrap();

        // One huge frame overshoots the whole traversal
        assert_eq!(driver.tick(Duration::from_secs(60)), TickOutcome::Completed);
        assert_eq!(driver.progress(), 1.0);

        // Further ticks do nothing
        assert_eq!(driver.tick(Duration::from_secs(61)), TickOutcome::Idle);
        assert_eq!(driver.tick(Duration::from_secs(62)), TickOutcome::Idle);
        assert_eq!(*completions.lock().unwrap(), 1);
    }

    #[test]
    fn test_cancel_retains_progress_and_skips_completion() {
        let (mut driver, _sink) = driver_with_sink(DriverConfig::default());
        let completions = completion_counter(&mut driver);

        driver
            .start(
                &[v(0.0, 0.0, 0.0), v(5.0, 0.0, 0.0), v(10.0, 0.0, 0.0)],
                Duration::ZERO,
            )
            .unwrap();

        // 2s of a 5s traversal puts progress at 0.4
        driver.tick(Duration::from_secs(2));
        assert!((driver.progress() - 0.4).abs() < 1e-9);

        driver.cancel();
        assert_eq!(driver.phase(), Phase::Cancelled);

        // Progress frozen, no completion, ticks inert
        assert_eq!(driver.tick(Duration::from_secs(10)), TickOutcome::Idle);
        assert!((driver.progress() - 0.4).abs() < 1e-9);
        assert_eq!(*completions.lock().unwrap(), 0);
    }

    #[test]
    fn test_cancel_handle_observed_on_next_tick() {
        let (mut driver, sink) = driver_with_sink(DriverConfig::default());
        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)], Duration::ZERO)
            .unwrap();

        let handle = driver.cancel_handle();
        driver.tick(Duration::from_millis(500));
        let emitted_before = sink.poses().len();

        handle.cancel();
        assert_eq!(
            driver.tick(Duration::from_millis(600)),
            TickOutcome::Cancelled
        );
        assert_eq!(driver.phase(), Phase::Cancelled);
        // Nothing emitted by the cancellation tick
        assert_eq!(sink.poses().len(), emitted_before);
    }

    #[test]
    fn test_restart_replaces_path_and_resets_progress() {
        let (mut driver, _sink) = driver_with_sink(DriverConfig::default());
        let completions = completion_counter(&mut driver);

        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)], Duration::ZERO)
            .unwrap();
        driver.tick(Duration::from_secs(2));
        assert!(driver.progress() > 0.0);

        // Restart mid-flight with a new route
        driver
            .start(&[v(0.0, 0.0, 0.0), v(0.0, 0.0, 8.0)], Duration::from_secs(2))
            .unwrap();
        assert_eq!(driver.progress(), 0.0);
        assert_eq!(driver.phase(), Phase::Running);

        assert_eq!(driver.tick(Duration::from_secs(10)), TickOutcome::Completed);
        assert_eq!(*completions.lock().unwrap(), 1);

        // A completed driver can be started again; completion fires per start
        driver
            .start(&[v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)], Duration::from_secs(10))
            .unwrap();
        driver.tick(Duration::from_secs(20));
        assert_eq!(*completions.lock().unwrap(), 2);
    }

    #[test]
    fn test_invalid_route_leaves_state_unchanged() {
        let (mut driver, _sink) = driver_with_sink(DriverConfig::default());
        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)], Duration::ZERO)
            .unwrap();
        driver.tick(Duration::from_secs(1));
        let progress_before = driver.progress();

        // One waypoint: the builder rejects it before any state changes
        let err = driver.start(&[v(3.0, 0.0, 3.0)], Duration::from_secs(1));
        assert!(matches!(err, Err(RouteError::InsufficientPoints { got: 1 })));
        assert_eq!(driver.phase(), Phase::Running);
        assert_eq!(driver.progress(), progress_before);
    }

    #[test]
    fn test_duplicate_waypoints_accepted() {
        let (mut driver, sink) = driver_with_sink(DriverConfig::default());
        driver
            .start(
                &[v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(5.0, 0.0, 0.0)],
                Duration::ZERO,
            )
            .unwrap();

        driver.tick(Duration::from_secs(10));
        assert_eq!(driver.phase(), Phase::Completed);

        let poses = sink.poses();
        assert!(poses.iter().all(|p| p.heading.is_finite()));
        let last = poses.last().unwrap();
        assert_eq!((last.x, last.y, last.z), (5.0, 0.0, 0.0));
    }

    #[test]
    fn test_speed_multiplier_scales_duration() {
        let config = DriverConfig {
            speed_multiplier: 2.0,
            ..DriverConfig::default()
        };
        let (mut driver, _sink) = driver_with_sink(config);
        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)], Duration::ZERO)
            .unwrap();

        // Double speed: 5s baseline finishes in 2.5s
        assert!(matches!(
            driver.tick(Duration::from_millis(2400)),
            TickOutcome::Running { .. }
        ));
        assert_eq!(
            driver.tick(Duration::from_millis(2500)),
            TickOutcome::Completed
        );
    }

    #[test]
    fn test_camera_emitted_alongside_pose() {
        let (mut driver, sink) = driver_with_sink(DriverConfig::default());
        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)], Duration::ZERO)
            .unwrap();
        driver.tick(Duration::from_secs(1));

        assert_eq!(sink.poses().len(), sink.camera_count());
    }

    #[test]
    fn test_bad_config_rejected() {
        let bad_configs = [
            DriverConfig {
                speed_multiplier: 0.0,
                ..DriverConfig::default()
            },
            DriverConfig {
                tilt: TiltConfig {
                    limit: -0.1,
                    gain: 50.0,
                },
                ..DriverConfig::default()
            },
            DriverConfig {
                tilt: TiltConfig {
                    limit: f64::NAN,
                    gain: 1.0,
                },
                ..DriverConfig::default()
            },
            DriverConfig {
                tilt: TiltConfig {
                    limit: 0.5,
                    gain: f64::INFINITY,
                },
                ..DriverConfig::default()
            },
            DriverConfig {
                camera: CameraConfig {
                    pitch: std::f64::consts::FRAC_PI_2,
                    ..CameraConfig::default()
                },
                ..DriverConfig::default()
            },
            DriverConfig {
                camera: CameraConfig {
                    follow_distance: f64::INFINITY,
                    ..CameraConfig::default()
                },
                ..DriverConfig::default()
            },
        ];

        for config in bad_configs {
            assert!(matches!(
                AnimationDriver::new(AgentId::new(), config, TestSink::default()),
                Err(RouteError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_ease_in_out_shape() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);

        // Monotone on a grid
        let mut last = 0.0;
        for i in 0..=100 {
            let e = ease_in_out(i as f64 / 100.0);
            assert!(e >= last);
            last = e;
        }
    }

    /// Manual clock: each frame advances virtual time by a fixed step.
    struct StepClock {
        now: Mutex<Duration>,
        step: Duration,
    }

    #[async_trait]
    impl FrameClock for StepClock {
        fn now(&self) -> Duration {
            *self.now.lock().unwrap()
        }

        async fn next_frame(&self) -> Duration {
            let mut now = self.now.lock().unwrap();
            *now += self.step;
            *now
        }
    }

    #[tokio::test]
    async fn test_run_loop_completes_on_clock() {
        let (mut driver, sink) = driver_with_sink(DriverConfig::default());
        let completions = completion_counter(&mut driver);
        let clock = StepClock {
            now: Mutex::new(Duration::ZERO),
            step: Duration::from_millis(16),
        };

        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)], clock.now())
            .unwrap();
        let phase = driver.run(&clock).await;

        assert_eq!(phase, Phase::Completed);
        assert_eq!(*completions.lock().unwrap(), 1);
        assert!(!sink.poses().is_empty());
    }

    #[tokio::test]
    async fn test_run_loop_stops_on_handle_cancel() {
        let (mut driver, _sink) = driver_with_sink(DriverConfig::default());
        let clock = StepClock {
            now: Mutex::new(Duration::ZERO),
            step: Duration::from_millis(16),
        };

        driver
            .start(&[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)], clock.now())
            .unwrap();
        driver.cancel_handle().cancel();

        let phase = driver.run(&clock).await;
        assert_eq!(phase, Phase::Cancelled);
    }
}
