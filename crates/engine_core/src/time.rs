//! Fixed-rate tick timing for the simulation loop.

use std::time::{Duration, Instant};

/// Default simulation rate in ticks per second.
pub const DEFAULT_TICK_RATE: f64 = 20.0;

/// Accumulates wall-clock time and releases it as fixed simulation ticks.
#[derive(Debug)]
pub struct TickClock {
    /// Time of the last update.
    last_update: Instant,
    /// Length of one tick.
    tick_interval: Duration,
    /// Time not yet consumed by ticks.
    accumulator: Duration,
    /// Ticks run since start.
    tick_count: u64,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

impl TickClock {
    /// Create a clock running at `rate` ticks per second. A rate with no usable
    /// non-zero interval (non-positive, non-finite, or too small) runs at the default.
    pub fn new(rate: f64) -> Self {
        let tick_interval = Some(rate)
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .and_then(|rate| Duration::try_from_secs_f64(1.0 / rate).ok())
            .filter(|interval| !interval.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f64(1.0 / DEFAULT_TICK_RATE));
        Self {
            last_update: Instant::now(),
            tick_interval,
            accumulator: Duration::ZERO,
            tick_count: 0,
        }
    }

    /// Add the wall-clock time elapsed since the previous update.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.advance(now - self.last_update);
        self.last_update = now;
    }

    /// Add an explicit amount of time.
    pub fn advance(&mut self, elapsed: Duration) {
        self.accumulator += elapsed;
    }

    /// Consume one tick's worth of time if available.
    pub fn should_tick(&mut self) -> bool {
        if self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;
            self.tick_count += 1;
            true
        } else {
            false
        }
    }

    /// Time left until the next tick is due.
    pub fn until_next_tick(&self) -> Duration {
        self.tick_interval.saturating_sub(self.accumulator)
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
