//! Logging setup for FrontGate.
//!
//! Records go to two sinks: the console (stderr, text or JSON) and a daily
//! rolling file `<log_dir>/server.YYYY-MM-DD.log`. `RUST_LOG` takes
//! precedence over the level derived from `DEBUG`.

use std::path::{Path, PathBuf};

use frontgate_core::{FrontGateError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name prefix; the appender adds the date and `log` suffix.
const LOG_FILE_PREFIX: &str = "server";
const LOG_FILE_SUFFIX: &str = "log";

/// Returns the filter used when `RUST_LOG` is not set.
pub fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

/// Name pattern of the rolling log files under `log_dir`.
pub fn log_file_pattern(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("{LOG_FILE_PREFIX}.YYYY-MM-DD.{LOG_FILE_SUFFIX}"))
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file sink on drop and must be kept alive
/// until the process exits.
pub fn init(log_dir: &Path, debug: bool, json: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        FrontGateError::ConfigError(format!(
            "Cannot create log directory {}: {err}",
            log_dir.display()
        ))
    })?;

    let file_appender = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)
        .map_err(|err| FrontGateError::ConfigError(format!("Cannot open log file: {err}")))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let (json_console, text_console) = if json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (None, Some(fmt::layer().with_writer(std::io::stderr)))
    };

    let file_layer = fmt::layer().with_ansi(false).with_writer(file_writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json_console)
        .with(text_console)
        .with(file_layer)
        .try_init()
        .map_err(|err| FrontGateError::ConfigError(format!("Cannot install logger: {err}")))?;

    Ok(guard)
}
