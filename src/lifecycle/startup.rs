//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the configuration from every layer and validate it once
//! - Build the prober and power-off action the configuration asks for
//!
//! # Design Decisions
//! - Fail fast: any configuration error is fatal
//! - The environment is injected so startup can be tested without mutating
//!   the process environment

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::loader::load_layers;
use crate::config::{validate_config, ConfigError, WatchdogConfig};
use crate::monitor::Watchdog;
use crate::power::PowerOffAction;
use crate::probe::PingProber;

/// Environment variable naming a TOML configuration file.
pub const ENV_CONFIG_PATH: &str = "WATCHDOG_CONFIG";

/// The watchdog as assembled from configuration.
pub type SystemWatchdog = Watchdog<PingProber, PowerOffAction>;

/// Defaults → config file → environment → CLI flags, then validation.
pub fn resolve_config<F>(cli: &Cli, env: F) -> Result<WatchdogConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = cli.config.clone().or_else(|| {
        env(ENV_CONFIG_PATH)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    let mut config = load_layers(path.as_deref(), &env)?;
    cli.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the production watchdog: `ping` probes and the configured
/// power-off command.
pub fn build_watchdog(config: &WatchdogConfig) -> SystemWatchdog {
    let prober = PingProber::new(config.target.ping_wait_secs);
    let action = PowerOffAction::from_config(&config.power);

    if config.power.dry_run {
        tracing::warn!("Dry run enabled, poweroff command will only be logged");
    }

    Watchdog::new(config.target.clone(), prober, action)
}
