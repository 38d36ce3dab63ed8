//! Log output.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber (human-readable, timestamped lines on stdout)
//! - Apply the configured level once the configuration is known
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the configured level
//! - The filter sits behind a reload layer: logging starts before the
//!   configuration is loaded so config warnings are visible

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Handle for adjusting the level after startup.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switch to `level` unless `RUST_LOG` pinned the filter at startup.
    pub fn set_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.filter.reload(default_filter(level)) {
            tracing::warn!(error = %e, "Failed to apply log level");
        }
    }
}

/// Directive used when `RUST_LOG` is unset.
pub fn default_directive(level: &str) -> String {
    format!("uplink_watchdog={}", level.to_ascii_lowercase())
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(default_directive(level))
}

/// Install the global subscriber. Call once, from `main`.
pub fn init_logging(level: &str) -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (default_filter(level), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stdout().is_terminal())
                .with_writer(std::io::stdout),
        )
        .init();

    LogHandle {
        filter: handle,
        from_env,
    }
}
