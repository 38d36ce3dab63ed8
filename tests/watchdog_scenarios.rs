//! End-to-end runs of the watchdog loop against scripted probes.
//!
//! All tests use start_paused so ticks land on exact seconds and the
//! runtime auto-advances the clock while the loop is idle.

use std::time::Duration;

use tokio::time::{self, Instant};
use uplink_watchdog::config::TargetConfig;
use uplink_watchdog::lifecycle::Shutdown;
use uplink_watchdog::probe::{ProbeError, ProbeOutcome};
use uplink_watchdog::{RunOutcome, Watchdog};

mod common;

use common::{RecordingPowerOff, ScriptedProber};

fn target(interval_secs: u64, timeout_secs: u64, log_every_secs: u64) -> TargetConfig {
    TargetConfig {
        interval_secs,
        timeout_secs,
        log_every_secs,
        ..TargetConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_always_failing_powers_off_once() {
    let prober = ScriptedProber::always(ProbeOutcome::Unreachable);
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();
    let start = Instant::now();

    let watchdog = Watchdog::new(target(1, 5, 2), prober.clone(), power.clone());
    let outcome = watchdog.run(shutdown.subscribe()).await;

    assert!(matches!(outcome, RunOutcome::PoweredOff(Ok(()))));
    assert_eq!(power.triggers(), 1);
    // Streak starts on the first tick (t=1) and crosses 5s at t=6.
    assert_eq!(prober.call_secs(start), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test(start_paused = true)]
async fn test_no_ticks_after_poweroff() {
    let prober = ScriptedProber::always(ProbeOutcome::Unreachable);
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();

    let watchdog = Watchdog::new(target(1, 3, 1), prober.clone(), power.clone());
    let handle = tokio::spawn(watchdog.run(shutdown.subscribe()));
    let outcome = handle.await.unwrap();
    assert!(matches!(outcome, RunOutcome::PoweredOff(_)));

    let probes = prober.call_secs(Instant::now()).len();
    time::sleep(Duration::from_secs(30)).await;
    assert_eq!(prober.call_secs(Instant::now()).len(), probes);
    assert_eq!(power.triggers(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_recovery_before_timeout_never_powers_off() {
    // interval=5s, timeout=120s, log_every=30s; down for the first 8 probes.
    let script = vec![ProbeOutcome::Unreachable; 8];
    let prober = ScriptedProber::new(script, ProbeOutcome::Reachable);
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();

    let watchdog = Watchdog::new(target(5, 120, 30), prober.clone(), power.clone());
    let handle = tokio::spawn(watchdog.run(shutdown.subscribe()));

    time::sleep(Duration::from_secs(600)).await;
    shutdown.trigger();

    let outcome = handle.await.unwrap();
    assert!(matches!(outcome, RunOutcome::Cancelled));
    assert_eq!(power.triggers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_flapping_target_restarts_streak() {
    // Failing 4s, one success, failing again: only the second streak may time out.
    let mut script = vec![ProbeOutcome::Unreachable; 4];
    script.push(ProbeOutcome::Reachable);
    let prober = ScriptedProber::new(script, ProbeOutcome::Unreachable);
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();
    let start = Instant::now();

    let watchdog = Watchdog::new(target(1, 5, 10), prober.clone(), power.clone());
    let outcome = watchdog.run(shutdown.subscribe()).await;

    assert!(matches!(outcome, RunOutcome::PoweredOff(Ok(()))));
    // Success at t=5, new streak starts at t=6, crosses 5s at t=11.
    assert_eq!(prober.call_secs(start).last(), Some(&11));
    assert_eq!(power.triggers(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_probe_timeouts_count_as_failures() {
    let prober = ScriptedProber::always(ProbeOutcome::TimedOut(ProbeError::Timeout(
        Duration::from_secs(2),
    )));
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();

    let watchdog = Watchdog::new(target(2, 6, 2), prober, power.clone());
    let outcome = watchdog.run(shutdown.subscribe()).await;

    assert!(matches!(outcome, RunOutcome::PoweredOff(Ok(()))));
    assert_eq!(power.triggers(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_poweroff_failure_still_ends_loop() {
    let prober = ScriptedProber::always(ProbeOutcome::Unreachable);
    let power = RecordingPowerOff::failing();
    let shutdown = Shutdown::new();

    let watchdog = Watchdog::new(target(1, 2, 1), prober.clone(), power.clone());
    let outcome = watchdog.run(shutdown.subscribe()).await;

    assert!(matches!(outcome, RunOutcome::PoweredOff(Err(_))));
    assert_eq!(power.triggers(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_request_during_outage_never_powers_off() {
    let prober = ScriptedProber::always(ProbeOutcome::Unreachable);
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();

    let watchdog = Watchdog::new(target(1, 5, 2), prober.clone(), power.clone());
    let handle = tokio::spawn(watchdog.run(shutdown.subscribe()));

    time::sleep(Duration::from_millis(3_500)).await;
    shutdown.trigger();

    let outcome = handle.await.unwrap();
    assert!(matches!(outcome, RunOutcome::Cancelled));
    assert_eq!(power.triggers(), 0);

    time::sleep(Duration::from_secs(10)).await;
    assert_eq!(power.triggers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_request_interrupts_hanging_probe() {
    let prober = ScriptedProber::hanging();
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();
    let start = Instant::now();

    let watchdog = Watchdog::new(target(1, 5, 2), prober.clone(), power.clone());
    let handle = tokio::spawn(watchdog.run(shutdown.subscribe()));

    time::sleep(Duration::from_secs(3)).await;
    assert_eq!(prober.call_secs(start), vec![1]);
    shutdown.trigger();

    let outcome = handle.await.unwrap();
    assert!(matches!(outcome, RunOutcome::Cancelled));
    assert_eq!(power.triggers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_healthy_target_runs_until_stopped() {
    let prober = ScriptedProber::always(ProbeOutcome::Reachable);
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();
    let start = Instant::now();

    let watchdog = Watchdog::new(target(5, 10, 5), prober.clone(), power.clone());
    let handle = tokio::spawn(watchdog.run(shutdown.subscribe()));

    time::sleep(Duration::from_secs(102)).await;
    shutdown.trigger();

    assert!(matches!(handle.await.unwrap(), RunOutcome::Cancelled));
    assert_eq!(prober.call_secs(start).len(), 20);
    assert_eq!(power.triggers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unrepresentable_interval_waits_instead_of_panicking() {
    let prober = ScriptedProber::always(ProbeOutcome::Unreachable);
    let power = RecordingPowerOff::default();
    let shutdown = Shutdown::new();
    let start = Instant::now();

    let watchdog = Watchdog::new(target(u64::MAX, 5, 2), prober.clone(), power.clone());
    let handle = tokio::spawn(watchdog.run(shutdown.subscribe()));

    time::sleep(Duration::from_secs(60)).await;
    shutdown.trigger();

    assert!(matches!(handle.await.unwrap(), RunOutcome::Cancelled));
    assert!(prober.call_secs(start).is_empty());
    assert_eq!(power.triggers(), 0);
}
