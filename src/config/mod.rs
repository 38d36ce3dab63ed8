//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → optional TOML file (loader.rs, parse & deserialize)
//!     → TARGET_* environment variables (loader.rs)
//!     → command-line flags (cli.rs)
//!     → validation.rs (semantic checks)
//!     → WatchdogConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the daemon runs with no configuration at all
//! - Malformed numeric env overrides fall back with a warning
//! - An invalid final configuration is fatal before any probe is sent

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LoggingConfig, PowerConfig, TargetConfig, WatchdogConfig};
pub use validation::{validate_config, ValidationError, MAX_DURATION_SECS};
