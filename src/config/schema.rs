//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! serialization for `--check-config` output.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the watchdog.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Address to probe and the timing of the failure streak.
    pub target: TargetConfig,

    /// What to run once the timeout is crossed.
    pub power: PowerConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Target and timing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    /// Host to probe (e.g., "192.168.1.1").
    pub address: String,

    /// Tick period in seconds. Also the time budget of each probe.
    pub interval_secs: u64,

    /// Continuous failure duration in seconds before powering off.
    pub timeout_secs: u64,

    /// Spacing in seconds of "still failing" progress lines.
    pub log_every_secs: u64,

    /// Per-packet wait handed to `ping -W`, clamped to the probe budget.
    pub ping_wait_secs: u64,
}

impl TargetConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            address: "192.168.1.1".to_string(),
            interval_secs: 5,
            timeout_secs: 120,
            log_every_secs: 30,
            ping_wait_secs: 1,
        }
    }
}

/// Power-off action configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PowerConfig {
    /// Program to execute.
    pub command: String,

    /// Arguments passed to `command`.
    pub args: Vec<String>,

    /// Log the command instead of running it.
    pub dry_run: bool,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            command: "systemctl".to_string(),
            args: vec!["poweroff".to_string()],
            dry_run: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
