//! Power-off by running an external command (`systemctl poweroff` by default).

use std::process::Stdio;

use tokio::process::Command;

use crate::config::PowerConfig;
use crate::power::{PowerOffError, ShutdownAction};

/// Runs the configured command with inherited stdout/stderr.
#[derive(Debug, Clone)]
pub struct CommandPowerOff {
    command: String,
    args: Vec<String>,
}

impl CommandPowerOff {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &PowerConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Command line as it would be typed in a shell, for log output.
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ShutdownAction for CommandPowerOff {
    async fn trigger(&self) -> Result<(), PowerOffError> {
        tracing::error!(command = %self.command_line(), "Poweroff triggered");

        let status = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| PowerOffError::Spawn {
                command: self.command_line(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PowerOffError::ExitStatus {
                command: self.command_line(),
                status,
            })
        }
    }
}

/// Logs the command that would run and reports success.
#[derive(Debug, Clone)]
pub struct DryRunPowerOff {
    inner: CommandPowerOff,
}

impl DryRunPowerOff {
    pub fn new(inner: CommandPowerOff) -> Self {
        Self { inner }
    }
}

impl ShutdownAction for DryRunPowerOff {
    async fn trigger(&self) -> Result<(), PowerOffError> {
        tracing::error!(
            command = %self.inner.command_line(),
            "Poweroff triggered (dry run, command not executed)"
        );
        Ok(())
    }
}

/// The action selected by `power.dry_run`.
#[derive(Debug, Clone)]
pub enum PowerOffAction {
    Execute(CommandPowerOff),
    DryRun(DryRunPowerOff),
}

impl PowerOffAction {
    pub fn from_config(config: &PowerConfig) -> Self {
        let command = CommandPowerOff::from_config(config);
        if config.dry_run {
            PowerOffAction::DryRun(DryRunPowerOff::new(command))
        } else {
            PowerOffAction::Execute(command)
        }
    }
}

impl ShutdownAction for PowerOffAction {
    async fn trigger(&self) -> Result<(), PowerOffError> {
        match self {
            PowerOffAction::Execute(action) => action.trigger().await,
            PowerOffAction::DryRun(action) => action.trigger().await,
        }
    }
}
