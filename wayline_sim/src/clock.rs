//! Simulation frame clock implementing FrameClock for deterministic runs.

use async_trait::async_trait;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wayline_env::FrameClock;

/// Virtual frame clock with seeded jitter.
///
/// Each frame advances virtual time by the nominal interval plus a
/// uniform jitter drawn from a ChaCha8 RNG, so frame pacing is both
/// irregular (exercising frame-rate independence) and exactly
/// reproducible from the seed.
pub struct SimClock {
    /// Master seed for this simulation
    seed: u64,

    /// Current virtual time (nanoseconds since simulation start)
    virtual_time_ns: Arc<Mutex<u64>>,

    /// Deterministic RNG for frame jitter
    rng: Arc<Mutex<ChaCha8Rng>>,

    /// Nominal interval between frames
    nominal: Duration,

    /// Jitter amplitude as a fraction of the nominal interval, in [0, 1)
    jitter: f64,
}

impl SimClock {
    /// Creates a clock with the given seed, nominal fps, and jitter.
    pub fn new(seed: u64, fps: u32, jitter: f64) -> Self {
        Self {
            seed,
            virtual_time_ns: Arc::new(Mutex::new(0)),
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
            nominal: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            jitter: jitter.clamp(0.0, 0.99),
        }
    }

    /// Creates an Arc-wrapped clock for sharing.
    pub fn shared(seed: u64, fps: u32, jitter: f64) -> Arc<Self> {
        Arc::new(Self::new(seed, fps, jitter))
    }

    /// Advances virtual time by one jittered frame and returns the new
    /// time. Synchronous twin of `next_frame` for manual tick loops.
    pub fn step(&self) -> Duration {
        let factor = if self.jitter > 0.0 {
            let mut rng = self.rng.lock().unwrap();
            1.0 + self.jitter * rng.gen_range(-1.0..=1.0)
        } else {
            1.0
        };
        let step_ns = (self.nominal.as_nanos() as f64 * factor).max(0.0) as u64;

        let mut time = self.virtual_time_ns.lock().unwrap();
        *time += step_ns;
        Duration::from_nanos(*time)
    }

    /// Advances virtual time by an explicit duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.virtual_time_ns.lock().unwrap();
        *time += duration.as_nanos() as u64;
    }

    /// Returns the clock's seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Clone for SimClock {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed,
            virtual_time_ns: Arc::clone(&self.virtual_time_ns),
            rng: Arc::clone(&self.rng),
            nominal: self.nominal,
            jitter: self.jitter,
        }
    }
}

#[async_trait]
impl FrameClock for SimClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(*self.virtual_time_ns.lock().unwrap())
    }

    async fn next_frame(&self) -> Duration {
        // In simulation the frame boundary is immediate: advance and return
        self.step()
    }
}
