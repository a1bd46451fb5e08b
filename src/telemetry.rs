use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Install the global log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise logs at `info`, or `warn` when
/// `quiet` is set. Thread names are shown so chunk notices name the worker
/// that produced them. Colors only when stdout is a terminal.
pub fn init_telemetry(quiet: bool) -> anyhow::Result<()> {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stdout().is_terminal())
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
