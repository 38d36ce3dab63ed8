//! Liveness monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! watchdog.rs:
//!     Periodic timer
//!     → Probe target (bounded by the interval)
//!     → Fold outcome into state.rs
//!     → Log transition, fire power-off on timeout
//!
//! state.rs:
//!     Healthy → Failing → Terminated
//!     Failing → Healthy on the first success
//! ```
//!
//! # Design Decisions
//! - State is owned by a single loop; no locking
//! - Probe timeouts and unreachable targets are the same failure
//! - Elapsed time is monotonic (`tokio::time::Instant`)
//! - Power-off is one-shot: never retried, never re-armed

pub mod state;
pub mod watchdog;

pub use state::{MonitorState, Policy, Transition};
pub use watchdog::{RunOutcome, Watchdog};
