//! Uplink watchdog library.
//!
//! Probes a network target on a fixed cadence and powers the host off once
//! the target has been unreachable for a configured duration.

pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod power;
pub mod probe;

pub use config::schema::WatchdogConfig;
pub use lifecycle::Shutdown;
pub use monitor::{RunOutcome, Watchdog};
