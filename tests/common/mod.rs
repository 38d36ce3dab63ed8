//! Shared fakes for watchdog integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use uplink_watchdog::power::{PowerOffError, ShutdownAction};
use uplink_watchdog::probe::{ProbeOutcome, Prober};

/// Prober that replays a script, then repeats a fallback outcome forever.
/// Records when each probe happened.
#[derive(Clone)]
pub struct ScriptedProber {
    script: Arc<Mutex<VecDeque<ProbeOutcome>>>,
    fallback: ProbeOutcome,
    calls: Arc<Mutex<Vec<Instant>>>,
    hang: bool,
}

impl ScriptedProber {
    pub fn new(script: Vec<ProbeOutcome>, fallback: ProbeOutcome) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            fallback,
            calls: Arc::new(Mutex::new(Vec::new())),
            hang: false,
        }
    }

    pub fn always(outcome: ProbeOutcome) -> Self {
        Self::new(Vec::new(), outcome)
    }

    /// Every probe blocks until it is cancelled.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::always(ProbeOutcome::Unreachable)
        }
    }

    /// Probe times in whole seconds since `start`.
    pub fn call_secs(&self, start: Instant) -> Vec<u64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.duration_since(start).as_secs())
            .collect()
    }
}

impl Prober for ScriptedProber {
    async fn check(&self, _address: &str, _budget: Duration) -> ProbeOutcome {
        self.calls.lock().unwrap().push(Instant::now());
        if self.hang {
            std::future::pending::<()>().await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Shutdown action that counts invocations and optionally fails.
#[derive(Clone, Default)]
pub struct RecordingPowerOff {
    triggers: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingPowerOff {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn triggers(&self) -> usize {
        self.triggers.load(Ordering::SeqCst)
    }
}

impl ShutdownAction for RecordingPowerOff {
    async fn trigger(&self) -> Result<(), PowerOffError> {
        self.triggers.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PowerOffError::Spawn {
                command: "systemctl poweroff".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        Ok(())
    }
}
