//! Tracing setup. Each invocation writes its own log file, named after the
//! command and the start time, so one `simulate` run can be read in isolation.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use unloader_core::config::LoggingConfig;

use crate::error::CliError;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

/// `<command>-<YYYYmmdd-HHMMSS>-<pid>.log`
pub fn run_log_file_name(command: &str, started: DateTime<Local>, pid: u32) -> String {
    format!("{command}-{}-{pid}.log", started.format("%Y%m%d-%H%M%S"))
}

pub fn log_dir(logging: &LoggingConfig) -> PathBuf {
    match logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(d) => PathBuf::from(d),
        None => std::env::temp_dir().join("unloader"),
    }
}

fn filter_for(logging: &LoggingConfig) -> Result<EnvFilter, CliError> {
    match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => Ok(EnvFilter::from_default_env()),
        _ => EnvFilter::try_new(&logging.level).map_err(|e| CliError::Logging(e.to_string())),
    }
}

pub fn init_tracing(logging: &LoggingConfig, command: &str) -> Result<(), CliError> {
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err(CliError::Logging(
            "logging disabled for both console and file".to_string(),
        ));
    }

    let filter = filter_for(logging)?;

    let mut run_log = None;
    if logging.file {
        let dir = log_dir(logging);
        std::fs::create_dir_all(&dir)
            .map_err(|e| CliError::Logging(format!("create log dir failed: {e}")))?;
        let name = run_log_file_name(command, Local::now(), std::process::id());
        let path = dir.join(&name);
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, &name));
        let _ = LOG_GUARD.set(guard);
        run_log = Some((writer, path));
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let (file_layer, path) = match run_log {
        Some((writer, path)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false),
            ),
            Some(path),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    if let Some(path) = path {
        tracing::debug!(command, log_file = %path.display(), "run log opened");
    }
    Ok(())
}
