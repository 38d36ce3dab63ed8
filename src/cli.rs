//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::WatchdogConfig;

#[derive(Debug, Default, Parser)]
#[command(name = "uplink-watchdog", version)]
#[command(about = "Power the host off when a network target stays unreachable", long_about = None)]
pub struct Cli {
    /// TOML configuration file (also read from WATCHDOG_CONFIG)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Host to probe
    #[arg(short, long)]
    pub target: Option<String>,

    /// Seconds between probes
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Seconds of continuous failure before powering off
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds between "still failing" log lines
    #[arg(long, value_name = "SECS")]
    pub log_every: Option<u64>,

    /// Log the power-off command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Validate the configuration, print it and exit
    #[arg(long)]
    pub check_config: bool,
}

impl Cli {
    /// Overlay command-line flags onto `config`. Flags win over every other
    /// source; validation runs afterwards.
    pub fn apply(&self, config: &mut WatchdogConfig) {
        if let Some(target) = &self.target {
            config.target.address = target.clone();
        }
        if let Some(secs) = self.interval {
            config.target.interval_secs = secs;
        }
        if let Some(secs) = self.timeout {
            config.target.timeout_secs = secs;
        }
        if let Some(secs) = self.log_every {
            config.target.log_every_secs = secs;
        }
        if self.dry_run {
            config.power.dry_run = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
