//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Parse CLI → Load config → Validate → Build prober + power-off action
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown.rs trigger → watchdog loop exits
//! ```
//!
//! # Design Decisions
//! - Fail fast: any configuration error is fatal before the first probe
//! - A stop request never runs the power-off action
//! - Exit code 1 is reserved for configuration and runtime errors

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
