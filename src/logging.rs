use crate::config::LoggingConfig;
use crate::constants::DEFAULT_LOG_FILTER;
use std::fs;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// A configured logger: the dispatch to install plus the guard that flushes
/// the file writer when dropped.
pub struct Logger {
    pub dispatch: Dispatch,
    _guard: WorkerGuard,
}

/// Builds a logger writing JSON lines to `<dir>/<file>` and readable lines to stdout.
///
/// Nothing is installed globally; the caller decides the scope with
/// [`tracing::dispatcher::with_default`] or [`tracing::dispatcher::set_global_default`].
pub fn build_logger(config: &LoggingConfig) -> std::io::Result<Logger> {
    fs::create_dir_all(&config.dir)?;

    // Single file, appended across runs
    let file_appender = tracing_appender::rolling::never(&config.dir, &config.file);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Create a JSON layer for file logging
    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking_writer);

    // Create a formatted layer for console logging
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    // Respect RUST_LOG if set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer);

    Ok(Logger {
        dispatch: Dispatch::new(subscriber),
        _guard: guard,
    })
}
