//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::WatchdogConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the probed host.
pub const ENV_TARGET_ADDR: &str = "TARGET_ADDR";
/// Environment variable for the tick period, in seconds.
pub const ENV_TARGET_INTERVAL: &str = "TARGET_INTERVAL";
/// Environment variable for the failure timeout, in seconds.
pub const ENV_TARGET_TIMEOUT: &str = "TARGET_TIMEOUT";
/// Environment variable for the progress-log cadence, in seconds.
pub const ENV_TARGET_LOG_EVERY: &str = "TARGET_LOG_EVERY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the optional TOML file, then the
/// environment. The result is validated before it is returned.
///
/// `env` looks up a single variable; pass `|key| std::env::var(key).ok()`
/// in production.
pub fn load_config<F>(path: Option<&Path>, env: F) -> Result<WatchdogConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = load_layers(path, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Like [`load_config`] but without validation, for callers that overlay
/// further sources first.
pub fn load_layers<F>(path: Option<&Path>, env: F) -> Result<WatchdogConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => WatchdogConfig::default(),
    };

    apply_env(&mut config, env);
    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// Empty variables count as unset. Numeric values that do not parse as an
/// integer greater than zero are ignored with a warning.
pub fn apply_env<F>(config: &mut WatchdogConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(addr) = env(ENV_TARGET_ADDR).filter(|v| !v.is_empty()) {
        config.target.address = addr;
    }

    let target = &mut config.target;
    override_secs(&env, ENV_TARGET_INTERVAL, &mut target.interval_secs);
    override_secs(&env, ENV_TARGET_TIMEOUT, &mut target.timeout_secs);
    override_secs(&env, ENV_TARGET_LOG_EVERY, &mut target.log_every_secs);
}

fn override_secs<F>(env: &F, key: &str, slot: &mut u64)
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = env(key).filter(|v| !v.is_empty()) else {
        return;
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => *slot = secs,
        _ => {
            tracing::warn!(
                key,
                value = %raw,
                using_secs = *slot,
                "Invalid environment override, keeping current value"
            );
        }
    }
}
