//! Tracing setup: human-readable stderr plus a daily JSON log file.

use crate::config::Config;

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_LOG_FILTER: &str = "screen_recorder=debug,screen_recorder_core=debug";

const LOG_FILE_PREFIX: &str = "screen-recorder.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// the process exits. Without a data directory only stderr is used.
pub(crate) fn init_logging() -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let log_dir = Config::project_dirs()
        .ok()
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .filter(|dir| fs::create_dir_all(dir).is_ok());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().json().with_ansi(false).with_writer(writer))
                .init();
            tracing::debug!(log_dir = ?dir, "File logging enabled");
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}
