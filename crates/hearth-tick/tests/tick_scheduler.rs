//! Integration tests for the tick scheduler.
//!
//! Uses `tokio::time::pause()` (via `start_paused`) so sleeps resolve
//! instantly and time only moves when the test advances it.

use std::time::Duration;

use hearth_tick::{TickConfig, TickPolicy, TickScheduler};

fn config_10hz() -> TickConfig {
    TickConfig::with_rate(10)
}

#[test]
fn test_scheduler_initial_state() {
    let s = TickScheduler::new(config_10hz());
    assert_eq!(s.tick_count(), 0);
    assert_eq!(s.tick_rate_hz(), 10);
    assert_eq!(s.tick_duration(), Duration::from_millis(100));
    assert_eq!(s.metrics().total_ticks, 0);
}

#[tokio::test(start_paused = true)]
async fn test_ticks_increment_monotonically() {
    let mut s = TickScheduler::new(config_10hz());
    for expected in 1..=5 {
        let info = s.wait_for_tick().await;
        assert_eq!(info.tick, expected);
        assert_eq!(info.dt, Duration::from_millis(100));
        assert!(!info.overrun);
    }
    assert_eq!(s.tick_count(), 5);
    assert_eq!(s.metrics().total_ticks, 5);
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_waits_one_period() {
    let mut s = TickScheduler::with_rate(5);
    let start = tokio::time::Instant::now();
    s.wait_for_tick().await;
    assert_eq!(start.elapsed(), Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn test_skip_policy_reports_missed_ticks() {
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::Skip,
        ..config_10hz()
    });
    s.wait_for_tick().await;

    // Stall for three and a half periods.
    tokio::time::advance(Duration::from_millis(450)).await;

    let info = s.wait_for_tick().await;
    assert!(info.overrun);
    assert_eq!(info.ticks_skipped, 3);
    assert_eq!(s.metrics().total_overruns, 1);
    assert_eq!(s.metrics().total_skipped, 3);

    // Skip reschedules from now, so the next tick is a full period away.
    let before = tokio::time::Instant::now();
    let next = s.wait_for_tick().await;
    assert!(!next.overrun);
    assert_eq!(before.elapsed(), Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn test_drop_policy_keeps_cadence() {
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::Drop,
        ..config_10hz()
    });
    s.wait_for_tick().await;

    // Wake at t = 350ms for a tick due at 200ms.
    tokio::time::advance(Duration::from_millis(250)).await;
    let late = s.wait_for_tick().await;
    assert!(late.overrun);
    assert_eq!(late.ticks_skipped, 1);

    // The next deadline stays on the original grid (t = 300ms), which is
    // already in the past, so it fires immediately.
    let before = tokio::time::Instant::now();
    s.wait_for_tick().await;
    assert_eq!(before.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_record_tick_end_updates_metrics() {
    let mut s = TickScheduler::new(config_10hz());
    s.wait_for_tick().await;
    s.record_tick_end();
    // A second call without a tick is ignored.
    s.record_tick_end();
    assert_eq!(s.metrics().total_ticks, 1);
}

#[tokio::test(start_paused = true)]
async fn test_initial_jitter_delays_only_the_first_tick() {
    let period = Duration::from_millis(200);
    let jitter = Duration::from_millis(50);

    for _ in 0..20 {
        let config = TickConfig {
            initial_jitter_us: jitter.as_micros() as u64,
            ..TickConfig::with_rate(5)
        };
        let mut s = TickScheduler::new(config);
        let start = tokio::time::Instant::now();

        let first = s.wait_for_tick().await;
        let waited = start.elapsed();
        assert!(waited >= period, "fired early: {waited:?}");
        assert!(waited < period + jitter, "jitter out of range: {waited:?}");
        assert!(!first.overrun);

        let mark = tokio::time::Instant::now();
        s.wait_for_tick().await;
        assert_eq!(mark.elapsed(), period);
    }
}

#[tokio::test(start_paused = true)]
async fn test_zero_jitter_fires_exactly_one_period_in() {
    let mut s = TickScheduler::new(TickConfig {
        initial_jitter_us: 0,
        ..TickConfig::with_rate(5)
    });
    let start = tokio::time::Instant::now();
    s.wait_for_tick().await;
    assert_eq!(start.elapsed(), Duration::from_millis(200));
}
