//! Host power-off action.
//!
//! # Responsibilities
//! - Run the terminal action once the failure timeout is crossed
//! - Report whether the action could be carried out
//!
//! # Design Decisions
//! - Called at most once per process; callers never retry
//! - Synchronous from the monitor's point of view (awaited to completion)
//! - A dry-run variant logs instead of acting, for commissioning devices

pub mod command;

use std::future::Future;

use thiserror::Error;

pub use command::{CommandPowerOff, DryRunPowerOff, PowerOffAction};

/// Failure to carry out the power-off action.
#[derive(Debug, Error)]
pub enum PowerOffError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    ExitStatus {
        command: String,
        status: std::process::ExitStatus,
    },
}

/// The terminal action fired when the target stays unreachable too long.
pub trait ShutdownAction: Send + Sync {
    fn trigger(&self) -> impl Future<Output = Result<(), PowerOffError>> + Send;
}
