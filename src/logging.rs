// SPDX-License-Identifier: MIT
//
// File logging.
//
// The terminal is in raw mode on the alternate screen for the whole run, so
// nothing may log to stdout or stderr. Events go to a daily-rolling file in
// the configured log directory through a non-blocking writer; the returned
// guard flushes it on drop and must outlive the editor.
//
// If the directory can't be created or a subscriber is already installed,
// logging is off and the editor runs anyway.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, DEFAULT_LOG_FILTER};

pub const LOG_FILE_PREFIX: &str = "cellpad.log";

/// Keeps the background log writer alive.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Install the global subscriber. Returns `None` when logging is disabled.
pub fn init(config: &Config) -> Option<LoggingGuard> {
    fs::create_dir_all(&config.log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = filter_for(&config.log_filter);

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    // The terminal chains its restore hook in front of this one on enter.
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        previous(info);
    }));

    tracing::info!(
        log_dir = %config.log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "tracing initialized"
    );

    Some(LoggingGuard {
        _guard: guard,
        log_dir: config.log_dir.clone(),
    })
}

/// Parse filter directives, falling back to the default on a bad value.
fn filter_for(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
