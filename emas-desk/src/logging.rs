//! Logging setup
//!
//! Stdout always, plus a daily-rolling file when a log directory is set.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const LOG_FILE_PREFIX: &str = "emas-desk.log";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Filter directive; `RUST_LOG` or the build default when absent
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
    pub json: bool,
}

fn env_filter(level: Option<&str>) -> EnvFilter {
    if let Some(level) = level {
        EnvFilter::new(level)
    } else if let Ok(from_env) = EnvFilter::try_from_default_env() {
        from_env
    } else if cfg!(debug_assertions) {
        EnvFilter::new("info,emas_desk=debug")
    } else {
        EnvFilter::new("info")
    }
}

/// Install the global subscriber
///
/// Keep the returned guard alive for the life of the process, or buffered
/// file output is lost.
pub fn init_logger(options: &LogOptions) -> anyhow::Result<Option<WorkerGuard>> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let stdout_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stdout);
    if options.json {
        layers.push(stdout_layer.json().boxed());
    } else {
        layers.push(stdout_layer.with_ansi(true).boxed());
    }

    let mut guard = None;
    if let Some(dir) = &options.dir {
        std::fs::create_dir_all(dir)?;
        let file_appender = rolling::daily(dir, LOG_FILE_PREFIX);
        let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_timer(LocalTimer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(non_blocking_file);
        if options.json {
            layers.push(file_layer.json().boxed());
        } else {
            layers.push(file_layer.boxed());
        }
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(options.level.as_deref()))
        .try_init()?;

    if let Some(dir) = &options.dir {
        tracing::info!(path = %dir.display(), "File logging enabled");
    }
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_level_wins() {
        let filter = env_filter(Some("warn"));
        assert_eq!(filter.to_string(), "warn");
    }
}
