//! Uplink Watchdog
//!
//! Powers an unattended host off when its uplink stays down.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       UPLINK WATCHDOG                        │
//!   │                                                              │
//!   │  ┌─────────┐   tick   ┌──────────┐  outcome  ┌───────────┐   │
//!   │  │  timer  │─────────▶│  probe   │──────────▶│  monitor  │   │
//!   │  │interval │          │ (ping)   │           │   state   │   │
//!   │  └─────────┘          └──────────┘           └─────┬─────┘   │
//!   │                                                    │ timeout │
//!   │                                                    ▼         │
//!   │  ┌─────────────┐                             ┌───────────┐   │
//!   │  │  lifecycle  │ SIGINT/SIGTERM: stop loop   │   power   │   │
//!   │  │   signals   │────────────────────────────▶│  (once)   │   │
//!   │  └─────────────┘      never powers off       └───────────┘   │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use uplink_watchdog::cli::Cli;
use uplink_watchdog::lifecycle::{startup, wait_for_signal, Shutdown};
use uplink_watchdog::observability::init_logging;
use uplink_watchdog::RunOutcome;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let log = init_logging(cli.log_level.as_deref().unwrap_or("info"));

    tracing::info!("uplink-watchdog v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match startup::resolve_config(&cli, |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration, aborting");
            return ExitCode::FAILURE;
        }
    };
    log.set_level(&config.logging.level);

    if cli.check_config {
        return match toml::to_string_pretty(&config) {
            Ok(rendered) => {
                println!("{}", rendered);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render configuration");
                ExitCode::FAILURE
            }
        };
    }

    let shutdown = Shutdown::new();
    let watchdog = startup::build_watchdog(&config);
    let run = watchdog.run(shutdown.subscribe());
    tokio::pin!(run);

    tokio::select! {
        outcome = &mut run => return exit_code(outcome),
        signal = wait_for_signal() => match signal {
            Ok(name) => {
                tracing::info!(signal = name, "Exit by signal: {}", name);
                shutdown.trigger();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handlers");
                return ExitCode::FAILURE;
            }
        },
    }

    exit_code(run.await)
}

fn exit_code(outcome: RunOutcome) -> ExitCode {
    match outcome {
        RunOutcome::Cancelled => tracing::info!("Watchdog stopped"),
        RunOutcome::PoweredOff(Ok(())) => tracing::info!("Poweroff requested, watchdog done"),
        RunOutcome::PoweredOff(Err(_)) => tracing::warn!("Poweroff failed, watchdog done"),
    }
    ExitCode::SUCCESS
}
