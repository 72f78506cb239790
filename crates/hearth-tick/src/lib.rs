//! Fixed-period tick pacing for the Hearth game loop.
//!
//! The game engine does no waiting of its own. Something has to decide
//! when the next tick runs, and that is this crate: [`TickScheduler`]
//! sleeps until the next deadline, reports how late it woke, and keeps
//! an eye on how much of the tick budget the engine used.
//!
//! ```ignore
//! let mut scheduler = TickScheduler::with_rate(5);
//! loop {
//!     let info = scheduler.wait_for_tick().await;
//!     engine.tick();
//!     scheduler.record_tick_end();
//! }
//! ```

use std::time::{Duration, Instant};

use rand::Rng;
use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to do when the loop wakes up later than scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickPolicy {
    /// Forget the missed deadlines and schedule from now.
    #[default]
    Skip,
    /// Keep the original cadence; the next deadline may already be due.
    Drop,
}

/// Full configuration for the tick scheduler.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Ticks per second. Must be between 1 and [`Self::MAX_TICK_RATE_HZ`].
    pub tick_rate_hz: u32,
    pub policy: TickPolicy,
    /// Fraction of the tick budget (0.0–1.0) above which a warning is logged.
    pub budget_warn_threshold: f64,
    /// Random delay (0–max µs) before the first tick.
    pub initial_jitter_us: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: Self::DEFAULT_TICK_RATE_HZ,
            policy: TickPolicy::default(),
            budget_warn_threshold: 0.80,
            initial_jitter_us: 0,
        }
    }
}

impl TickConfig {
    /// Five ticks a second: responsive for typed commands, idle otherwise.
    pub const DEFAULT_TICK_RATE_HZ: u32 = 5;

    pub const MAX_TICK_RATE_HZ: u32 = 100;

    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz,
            ..Default::default()
        }
    }

    /// Clamps out-of-range values into something the scheduler can use.
    pub fn validated(mut self) -> Self {
        let clamped = self.tick_rate_hz.clamp(1, Self::MAX_TICK_RATE_HZ);
        if clamped != self.tick_rate_hz {
            warn!(
                requested = self.tick_rate_hz,
                using = clamped,
                "tick_rate_hz out of range, clamping"
            );
            self.tick_rate_hz = clamped;
        }
        self.budget_warn_threshold = self.budget_warn_threshold.clamp(0.0, 1.0);
        self
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }
}

// ---------------------------------------------------------------------------
// Tick info and metrics
// ---------------------------------------------------------------------------

/// Returned by [`TickScheduler::wait_for_tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Monotonically increasing tick number, starting at 1.
    pub tick: u64,
    /// The fixed tick period.
    pub dt: Duration,
    /// `true` if the tick fired more than 10% of a period late.
    pub overrun: bool,
    /// Whole periods missed before this tick fired.
    pub ticks_skipped: u64,
}

/// Running totals kept by the scheduler.
#[derive(Debug, Clone, Default)]
pub struct TickMetrics {
    pub total_ticks: u64,
    pub total_overruns: u64,
    pub total_skipped: u64,
    /// Exponential moving average of engine time per tick (α = 0.1).
    pub avg_tick_time: Duration,
    pub max_tick_time: Duration,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Paces the game loop at a fixed rate.
pub struct TickScheduler {
    config: TickConfig,
    tick_duration: Duration,
    tick_count: u64,
    next_tick: TokioInstant,
    /// Set when a tick fires, consumed by `record_tick_end`.
    tick_start: Option<Instant>,
    metrics: TickMetrics,
}

impl TickScheduler {
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        let tick_duration = config.tick_duration();

        let jitter = if config.initial_jitter_us > 0 {
            Duration::from_micros(rand::rng().random_range(0..config.initial_jitter_us))
        } else {
            Duration::ZERO
        };

        debug!(
            rate_hz = config.tick_rate_hz,
            budget_ms = tick_duration.as_secs_f64() * 1000.0,
            policy = ?config.policy,
            "tick scheduler created"
        );

        Self {
            tick_duration,
            tick_count: 0,
            next_tick: TokioInstant::now() + tick_duration + jitter,
            tick_start: None,
            metrics: TickMetrics::default(),
            config,
        }
    }

    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self::new(TickConfig::with_rate(tick_rate_hz))
    }

    /// Sleeps until the next tick is due.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let due = self.next_tick;
        time::sleep_until(due).await;

        let now = TokioInstant::now();
        self.tick_count += 1;
        self.tick_start = Some(Instant::now());

        let late_by = now.saturating_duration_since(due);
        let overrun = late_by > self.tick_duration / 10;
        let ticks_skipped = if overrun {
            (late_by.as_nanos() / self.tick_duration.as_nanos()) as u64
        } else {
            0
        };

        self.next_tick = match self.config.policy {
            TickPolicy::Skip => now + self.tick_duration,
            TickPolicy::Drop => due + self.tick_duration,
        };

        if overrun {
            self.metrics.total_overruns += 1;
            warn!(
                tick = self.tick_count,
                late_ms = late_by.as_secs_f64() * 1000.0,
                skipped = ticks_skipped,
                policy = ?self.config.policy,
                "tick fired late"
            );
        }
        self.metrics.total_skipped += ticks_skipped;
        self.metrics.total_ticks += 1;

        trace!(tick = self.tick_count, overrun, "tick fired");

        TickInfo {
            tick: self.tick_count,
            dt: self.tick_duration,
            overrun,
            ticks_skipped,
        }
    }

    /// Records that the engine finished the current tick.
    ///
    /// Logs a warning when the engine used more than the configured share
    /// of the tick budget. A call without a preceding tick is ignored.
    pub fn record_tick_end(&mut self) {
        let Some(start) = self.tick_start.take() else {
            return;
        };
        let elapsed = start.elapsed();

        let utilization = elapsed.as_secs_f64() / self.tick_duration.as_secs_f64();
        if utilization >= self.config.budget_warn_threshold {
            warn!(
                tick = self.tick_count,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                budget_ms = self.tick_duration.as_secs_f64() * 1000.0,
                "tick used most of its budget"
            );
        }

        if elapsed > self.metrics.max_tick_time {
            self.metrics.max_tick_time = elapsed;
        }
        let prev = self.metrics.avg_tick_time.as_secs_f64();
        self.metrics.avg_tick_time =
            Duration::from_secs_f64(prev * 0.9 + elapsed.as_secs_f64() * 0.1);
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick_rate_hz(&self) -> u32 {
        self.config.tick_rate_hz
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate_is_five_hz() {
        let cfg = TickConfig::default();
        assert_eq!(cfg.tick_rate_hz, 5);
        assert_eq!(cfg.tick_duration(), Duration::from_millis(200));
    }

    #[test]
    fn test_validated_clamps_rate() {
        assert_eq!(TickConfig::with_rate(0).validated().tick_rate_hz, 1);
        assert_eq!(TickConfig::with_rate(1000).validated().tick_rate_hz, 100);
        assert_eq!(TickConfig::with_rate(20).validated().tick_rate_hz, 20);
    }

    #[test]
    fn test_validated_clamps_threshold() {
        let cfg = TickConfig {
            budget_warn_threshold: 3.0,
            ..TickConfig::default()
        }
        .validated();
        assert_eq!(cfg.budget_warn_threshold, 1.0);
    }
}
