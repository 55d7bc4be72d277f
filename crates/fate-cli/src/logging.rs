//! Tracing setup.
//!
//! The filter comes from `RUST_LOG` and defaults to `warn`. The terminal UI
//! owns the screen, so it either logs to a file or not at all.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Where log lines go.
pub enum LogTarget {
    /// Standard error, for one-shot commands.
    Stderr,
    /// Append to a file, without ANSI colours.
    File(PathBuf),
    /// Install the filter only.
    Silent,
}

/// Install the global subscriber.
pub fn init(target: LogTarget) -> Result<(), String> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| format!("invalid log filter: {e}"))?;

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(env_filter)
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;
            let result = tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .try_init();
            tracing::info!(path = %path.display(), "logging initialized");
            result
        }
        LogTarget::Silent => tracing_subscriber::registry().with(env_filter).try_init(),
    };

    installed.map_err(|e| format!("logging setup failed: {e}"))
}
