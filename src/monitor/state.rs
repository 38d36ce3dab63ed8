//! Failure-streak state machine.
//!
//! # States
//! - Healthy: no failure streak in progress
//! - Failing(elapsed): a streak started at `failure_streak_start`
//! - Terminated: the timeout was crossed; no further transitions
//!
//! # State Transitions
//! ```text
//! Healthy  → Healthy:    probe succeeded
//! Healthy  → Failing:    probe failed, streak start = now
//! Failing  → Healthy:    probe succeeded, streak and milestones cleared
//! Failing  → Failing:    probe failed, elapsed < timeout
//! Failing  → Terminated: probe failed, elapsed >= timeout
//! ```
//!
//! Progress reports are anchored to the streak start: the n-th report is due
//! once `elapsed >= n * log_every`, and the tick that crosses the timeout
//! always reports. At most one report per observation.

use std::time::Duration;

use tokio::time::Instant;

/// Timing thresholds applied to a failure streak, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub timeout_secs: u64,
    pub log_every_secs: u64,
}

/// What a single observation did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Success while already healthy.
    Healthy,
    /// Success that ended a failure streak.
    Recovered { outage: Duration },
    /// First failure after a success (or at startup).
    StreakStarted,
    /// Failure inside an ongoing streak that has not reached the timeout.
    StillFailing { elapsed_secs: u64, report: bool },
    /// Failure that crossed the timeout. The state is now terminated.
    TimeoutReached { elapsed_secs: u64 },
    /// Observation after termination; ignored.
    Terminated,
}

/// Streak bookkeeping for one run of the monitor.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    failure_streak_start: Option<Instant>,
    reported_milestones: u64,
    terminated: bool,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_streak_start(&self) -> Option<Instant> {
        self.failure_streak_start
    }

    pub fn reported_milestones(&self) -> u64 {
        self.reported_milestones
    }

    pub fn is_failing(&self) -> bool {
        self.failure_streak_start.is_some()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Fold one probe result observed at `now` into the state.
    pub fn observe(&mut self, reachable: bool, now: Instant, policy: &Policy) -> Transition {
        if self.terminated {
            return Transition::Terminated;
        }

        if reachable {
            return match self.failure_streak_start.take() {
                Some(start) => {
                    self.reported_milestones = 0;
                    Transition::Recovered {
                        outage: now.saturating_duration_since(start),
                    }
                }
                None => Transition::Healthy,
            };
        }

        let Some(start) = self.failure_streak_start else {
            self.failure_streak_start = Some(now);
            self.reported_milestones = 0;
            return Transition::StreakStarted;
        };

        let elapsed_secs = now.saturating_duration_since(start).as_secs();
        let next_milestone = (self.reported_milestones + 1).saturating_mul(policy.log_every_secs);
        let timed_out = elapsed_secs >= policy.timeout_secs;
        let report = elapsed_secs >= next_milestone || timed_out;

        if report {
            self.reported_milestones += 1;
        }

        if timed_out {
            self.terminated = true;
            Transition::TimeoutReached { elapsed_secs }
        } else {
            Transition::StillFailing {
                elapsed_secs,
                report,
            }
        }
    }
}
