//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! monitor, probe, power, config:
//!     → tracing events (one line per notable transition)
//!     → logging.rs subscriber → stdout
//! ```
//!
//! # Design Decisions
//! - Line-oriented, human-readable output; structured fields ride along
//! - Log level configurable via config, CLI and environment

pub mod logging;

pub use logging::{init_logging, LogHandle};
