//! Logger bootstrap for the desktop binary.
//!
//! Logs go to stderr. With a log directory they are also written to a
//! size-rotated file set. An explicit level beats `RUST_LOG`, which beats
//! the build-mode default.

use std::path::Path;

use anyhow::{Context, Result, bail};
use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;

const LOG_FILE_BASENAME: &str = "watch-constellation";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

/// Starts the global logger. Keep the returned handle alive for the
/// lifetime of the process or buffered file output is lost.
pub fn init_logging(level: Option<&str>, log_dir: Option<&Path>) -> Result<LoggerHandle> {
    let logger = match level {
        Some(level) => {
            let level = normalize_level(level)?;
            Logger::try_with_str(level)
                .with_context(|| format!("invalid log level `{level}`"))?
        }
        None => Logger::try_with_env_or_str(default_log_level())
            .context("invalid RUST_LOG specification")?,
    };

    let logger = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .append()
                .write_mode(WriteMode::BufferAndFlush)
                .format_for_files(flexi_logger::detailed_format)
                .duplicate_to_stderr(Duplicate::All)
        }
        None => logger.log_to_stderr(),
    };

    let handle = logger
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .context("failed to start logger")?;

    info!(
        "event=app_start platform={} build_mode={} version={} log_dir={}",
        std::env::consts::OS,
        build_mode(),
        env!("CARGO_PKG_VERSION"),
        log_dir.map_or_else(|| "-".to_owned(), |dir| dir.display().to_string())
    );
    Ok(handle)
}

pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "info" }
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "release" }
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => bail!("unsupported log level `{other}`; expected trace|debug|info|warn|error|off"),
    }
}
