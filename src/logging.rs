//! File-based logging.
//!
//! The terminal belongs to the UI, so nothing is ever written to stdout or
//! stderr. Logs go to `speedy.log` in the state directory. `DEBUG_LOGGING=1`
//! (or `--debug`) enables debug output for this crate.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::app_dirs::AppDirs;
use crate::error::{Result, SpeedyError};

pub const LOG_FILE: &str = "speedy.log";

fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,speedy=debug"
    } else {
        "info"
    }
}

/// Install the global subscriber writing to the default state directory.
///
/// The returned guard must be held for the life of the process so buffered
/// lines are flushed on exit. `None` means no sink could be set up and
/// logging is disabled.
pub fn init(debug: bool) -> Option<WorkerGuard> {
    let verbose = debug || std::env::var("DEBUG_LOGGING").is_ok();
    let dir = AppDirs::state_dir()?;
    init_in(&dir, verbose).ok()
}

pub fn init_in(dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(EnvFilter::new(filter_directive(verbose)))
        .try_init()
        .map_err(|e| SpeedyError::Logging(e.to_string()))?;

    tracing::info!(log_dir = ?dir, verbose, "speedy logging initialized");

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_raises_crate_level() {
        assert_eq!(filter_directive(false), "info");
        assert!(filter_directive(true).contains("speedy=debug"));
    }

    #[test]
    fn init_in_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        // another test may already own the global subscriber; the directory
        // is created either way
        let _ = init_in(&log_dir, false);
        assert!(log_dir.is_dir());
    }
}
