//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (durations > 0, address present)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatchdogConfig → Result<(), Vec<ValidationError>>
//! - Runs before any probe is sent

use thiserror::Error;

use crate::config::schema::WatchdogConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("target address is empty")]
    EmptyAddress,

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("{field} must be at most {max} seconds")]
    DurationTooLarge { field: &'static str, max: u64 },

    #[error("power command is empty")]
    EmptyPowerCommand,

    #[error("unknown log level `{0}`")]
    UnknownLogLevel(String),
}

/// Upper bound for every configured duration (30 days).
pub const MAX_DURATION_SECS: u64 = 30 * 24 * 60 * 60;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Check a fully layered configuration.
pub fn validate_config(config: &WatchdogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let target = &config.target;

    if target.address.trim().is_empty() {
        errors.push(ValidationError::EmptyAddress);
    }

    let durations = [
        ("target.interval_secs", target.interval_secs),
        ("target.timeout_secs", target.timeout_secs),
        ("target.log_every_secs", target.log_every_secs),
        ("target.ping_wait_secs", target.ping_wait_secs),
    ];
    for (field, value) in durations {
        if value == 0 {
            errors.push(ValidationError::ZeroDuration { field });
        } else if value > MAX_DURATION_SECS {
            errors.push(ValidationError::DurationTooLarge {
                field,
                max: MAX_DURATION_SECS,
            });
        }
    }

    if config.power.command.trim().is_empty() {
        errors.push(ValidationError::EmptyPowerCommand);
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
