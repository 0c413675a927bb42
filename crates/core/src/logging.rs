//! Tracing setup shared by all entry points.
//!
//! Everything goes to a daily rolling file under [`log_dir`]; console output
//! on stderr is optional and stays terse (no timestamps or targets).

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Overrides the default filter, e.g. `JPACKSTAGE_LOG=jpackstage_core=trace`.
pub const FILTER_ENV: &str = "JPACKSTAGE_LOG";

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// File name prefix, e.g. `collect` gives `collect.2026-10-16`
    pub component: String,
    pub console: bool,
    pub verbose: bool,
    /// Defaults to [`log_dir`]
    pub dir: Option<PathBuf>,
}

impl LogOptions {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            console: true,
            verbose: false,
            dir: None,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| {
            EnvFilter::new(if self.verbose { "debug" } else { "info" })
        })
    }
}

pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jpackstage/logs")
}

/// Installs the global subscriber. Keep the guard alive until exit or the
/// tail of the file log is lost.
///
/// A subscriber installed earlier (tests, embedding tools) is left alone.
pub fn init_logging(options: &LogOptions) -> WorkerGuard {
    let dir = options.dir.clone().unwrap_or_else(log_dir);
    let _ = std::fs::create_dir_all(&dir);

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, &options.component));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let console_layer = options.console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
    });

    let _ = tracing_subscriber::registry()
        .with(options.filter())
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}
