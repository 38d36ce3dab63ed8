//! The monitoring loop.
//!
//! # Responsibilities
//! - Tick at the configured interval and probe the target once per tick
//! - Fold each outcome into [`MonitorState`] and log notable transitions
//! - Fire the power-off action exactly once when the timeout is crossed

use std::time::Duration;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::TargetConfig;
use crate::monitor::state::{MonitorState, Policy, Transition};
use crate::power::{PowerOffError, ShutdownAction};
use crate::probe::{ProbeOutcome, Prober};

/// Stand-in for "never" when the first tick cannot be represented.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// How a watchdog run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Stopped by an external request; the power-off action never ran.
    Cancelled,
    /// The timeout was crossed and the power-off action was invoked.
    PoweredOff(Result<(), PowerOffError>),
}

/// Result of folding one probe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    PowerOff,
}

pub struct Watchdog<P, S> {
    target: TargetConfig,
    policy: Policy,
    prober: P,
    action: S,
    state: MonitorState,
}

impl<P: Prober, S: ShutdownAction> Watchdog<P, S> {
    pub fn new(target: TargetConfig, prober: P, action: S) -> Self {
        let policy = Policy {
            timeout_secs: target.timeout_secs,
            log_every_secs: target.log_every_secs,
        };

        Self {
            target,
            policy,
            prober,
            action,
            state: MonitorState::new(),
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run until the power-off action fires or `shutdown` is signalled.
    ///
    /// The first probe happens one full interval after start. A stop request
    /// interrupts an in-flight probe and always wins over a pending power-off.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> RunOutcome {
        tracing::info!(
            addr = %self.target.address,
            interval_secs = self.target.interval_secs,
            timeout_secs = self.policy.timeout_secs,
            log_every_secs = self.policy.log_every_secs,
            "Monitor {} every {}s, shutdown after {}s offline",
            self.target.address,
            self.target.interval_secs,
            self.policy.timeout_secs
        );

        let interval = self.target.interval();
        let now = Instant::now();
        let first_tick = now
            .checked_add(interval)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let mut ticker = time::interval_at(first_tick, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("Watchdog received shutdown signal, exiting loop");
                    return RunOutcome::Cancelled;
                }
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("Watchdog received shutdown signal during probe, exiting loop");
                    return RunOutcome::Cancelled;
                }
                outcome = self.prober.check(&self.target.address, interval) => outcome,
            };

            if self.fold(outcome, Instant::now()) == Step::PowerOff {
                if stop_requested(&mut shutdown) {
                    tracing::info!("Shutdown signal pending, skipping poweroff");
                    return RunOutcome::Cancelled;
                }

                let result = self.action.trigger().await;
                if let Err(e) = &result {
                    tracing::error!(error = %e, "Poweroff err");
                }
                return RunOutcome::PoweredOff(result);
            }
        }
    }

    fn fold(&mut self, outcome: ProbeOutcome, now: Instant) -> Step {
        if let ProbeOutcome::TimedOut(e) = &outcome {
            tracing::warn!(addr = %self.target.address, error = %e, "Ping err");
        }

        match self.state.observe(outcome.is_reachable(), now, &self.policy) {
            Transition::Healthy => {
                tracing::info!(addr = %self.target.address, "Ping OK");
            }
            Transition::Recovered { outage } => {
                tracing::info!(
                    addr = %self.target.address,
                    outage_secs = outage.as_secs(),
                    "Ping OK, target back after {}s",
                    outage.as_secs()
                );
            }
            Transition::StreakStarted => {
                tracing::warn!(addr = %self.target.address, "Ping failed, timer started");
            }
            Transition::StillFailing {
                elapsed_secs,
                report,
            } => {
                if report {
                    self.report_failing(elapsed_secs);
                }
            }
            Transition::TimeoutReached { elapsed_secs } => {
                self.report_failing(elapsed_secs);
                return Step::PowerOff;
            }
            Transition::Terminated => {}
        }

        Step::Continue
    }

    fn report_failing(&self, elapsed_secs: u64) {
        tracing::warn!(
            addr = %self.target.address,
            elapsed_secs,
            timeout_secs = self.policy.timeout_secs,
            milestone = self.state.reported_milestones(),
            "Ping failed for {}s/{}s",
            elapsed_secs,
            self.policy.timeout_secs
        );
    }
}

/// Non-blocking check for a stop request (or a dropped coordinator).
fn stop_requested(shutdown: &mut broadcast::Receiver<()>) -> bool {
    !matches!(shutdown.try_recv(), Err(TryRecvError::Empty))
}
