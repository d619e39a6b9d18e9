//! Tracing subscriber setup.
//!
//! The full-screen TUI owns the terminal, so interactive runs log to a
//! daily file under `OTPGATE_HOME/logs`. Everything else logs to stderr.

use anyhow::{Context, Result};
use otpgate_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DIRECTIVE: &str = "otpgate=info";

pub enum LogTarget {
    Stderr,
    File,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber.
///
/// The returned guard flushes buffered file output on drop; keep it alive
/// for the whole run.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(target: LogTarget) -> Result<Option<WorkerGuard>> {
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .with(env_filter())
                .try_init();
            Ok(None)
        }
        LogTarget::File => {
            let dir = paths::logs_dir()?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(&dir, "otpgate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(env_filter())
                .try_init();
            Ok(Some(guard))
        }
    }
}
