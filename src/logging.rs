//! Logging setup.
//!
//! Builds a `tracing` subscriber with two outputs: a fmt layer on stderr and
//! a non-blocking file appender writing `videoslimmer.log` into the
//! configured log directory. `RUST_LOG` overrides the level chosen on the
//! command line. Logging is observational only; its absence never affects
//! processing behavior.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name within the log directory.
const LOG_FILE_NAME: &str = "videoslimmer.log";

/// Logging verbosity selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Parse a level name, falling back to `info` for unknown values.
    ///
    /// An invalid level is not fatal; the original behavior is to complain
    /// and continue at the default level.
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warning" => LogLevel::Warning,
            "error" => LogLevel::Error,
            other => {
                eprintln!(
                    "incorrect logging level '{}' specified, defaulting to log level 'info'",
                    other
                );
                LogLevel::Info
            }
        }
    }

    /// Filter directive for this level.
    fn filter_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Creates the log directory if missing. The returned guard must be held
/// for the lifetime of the run so buffered log lines are flushed on exit.
pub fn init(level: LogLevel, logs_dir: &Path) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_str()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(filter)
        .init();

    Ok(guard)
}
