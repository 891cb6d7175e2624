//! File-backed tracing setup. The terminal belongs to the UI, so nothing is
//! written to stderr.

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "pokeguess.log";

/// Install the global subscriber. Keep the returned guard alive for the
/// whole run or buffered lines are lost on exit.
pub fn init(log_dir: Option<PathBuf>) -> io::Result<WorkerGuard> {
    let dir = log_dir.unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG wins when set; otherwise info and up.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!("log file: {}", log_path(&dir).display());
    Ok(guard)
}

pub fn default_log_dir() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pokeguess")
        .join("logs")
}

fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE)
}
