//! File logging. The terminal belongs to the dashboard, so nothing is ever
//! written to stdout or stderr once the UI is up.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LogFormat};

pub const LOG_FILE_NAME: &str = "tuimarket.log";

/// Install the global subscriber writing to `<log_dir>/tuimarket.log`.
///
/// Returns the appender guard, which must live until exit so buffered lines
/// are flushed. Returns `None` when logging is disabled or the directory
/// cannot be created.
pub fn init_tracing(config: &AppConfig) -> Option<WorkerGuard> {
    let dir = config.log_dir.as_deref()?;
    let (writer, guard) = file_writer(dir)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init(),
    };

    installed.ok().map(|_| guard)
}

fn file_writer(dir: &Path) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    Some(tracing_appender::non_blocking(appender))
}
