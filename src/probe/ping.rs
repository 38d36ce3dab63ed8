//! ICMP echo probe via the system `ping` binary.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time;

use crate::probe::{ProbeError, ProbeOutcome, Prober};

/// Sends one echo request with `ping -c 1 -W <wait> <address>`.
#[derive(Debug, Clone)]
pub struct PingProber {
    program: String,
    wait_secs: u64,
}

impl PingProber {
    pub fn new(wait_secs: u64) -> Self {
        Self {
            program: "ping".to_string(),
            wait_secs,
        }
    }

    /// Use a different binary (e.g., `ping6` or an absolute path).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// `-W` value: the configured wait, never longer than the budget and
    /// never below one second.
    fn effective_wait(&self, budget: Duration) -> u64 {
        self.wait_secs.min(budget.as_secs()).max(1)
    }

    fn command(&self, address: &str, budget: Duration) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-c")
            .arg("1")
            .arg("-W")
            .arg(self.effective_wait(budget).to_string())
            .arg(address)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

impl Prober for PingProber {
    async fn check(&self, address: &str, budget: Duration) -> ProbeOutcome {
        let mut cmd = self.command(address, budget);

        match time::timeout(budget, cmd.status()).await {
            Ok(Ok(status)) if status.success() => ProbeOutcome::Reachable,
            Ok(Ok(status)) => {
                tracing::debug!(addr = %address, %status, "Ping reported no reply");
                ProbeOutcome::Unreachable
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    addr = %address,
                    program = %self.program,
                    error = %e,
                    "Failed to run ping"
                );
                ProbeOutcome::Unreachable
            }
            Err(_) => ProbeOutcome::TimedOut(ProbeError::Timeout(budget)),
        }
    }
}
