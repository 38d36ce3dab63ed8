//! Reachability probing.
//!
//! # Responsibilities
//! - Perform one reachability check per call, bounded by a time budget
//! - Distinguish "target did not answer" from "check ran out of time"
//!
//! # Design Decisions
//! - No retries inside a probe; the monitor's cadence is the retry policy
//! - Probes are stateless; all streak tracking lives in the monitor
//! - Dropping an in-flight probe cancels it (child processes are killed)

pub mod ping;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

pub use ping::PingProber;

/// Why a probe did not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),
}

/// Result of a single reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The target answered within the budget.
    Reachable,
    /// The check completed within the budget but the target did not answer.
    Unreachable,
    /// The check did not complete within the budget.
    TimedOut(ProbeError),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable)
    }
}

/// A single-shot reachability check against an address.
pub trait Prober: Send + Sync {
    fn check(&self, address: &str, budget: Duration) -> impl Future<Output = ProbeOutcome> + Send;
}
