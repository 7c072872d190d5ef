//! `tracing` subscriber setup.
//!
//! Logs go to stderr so `review --json` output on stdout stays clean. An
//! optional file sink is written through a non-blocking `tracing-appender`
//! worker; keep the returned guard alive until exit or buffered lines are lost.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LOG_ENV, LoggingSection};

/// Pick the filter directive: `CODEREFINE_LOG` wins, then `--verbose`, then the file.
pub fn filter_directive(env_value: Option<&str>, level: &str, verbose: bool) -> String {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directive) => directive.to_string(),
        None if verbose => "debug".to_string(),
        None => level.to_lowercase(),
    }
}

/// Install the global subscriber.
pub fn init(
    settings: &LoggingSection,
    log_file: Option<&Path>,
    verbose: bool,
) -> Result<Option<WorkerGuard>> {
    let env_value = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env_value.as_deref(), &settings.level, verbose);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{}'", directive))?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);
    if settings.json {
        layers.push(stderr.json().boxed());
    } else {
        layers.push(stderr.boxed());
    }

    let guard = match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file has no file name: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
            if settings.json {
                layers.push(file_layer.json().boxed());
            } else {
                layers.push(file_layer.boxed());
            }
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directive_wins() {
        assert_eq!(
            filter_directive(Some("coderefine=trace"), "warn", true),
            "coderefine=trace"
        );
    }

    #[test]
    fn test_verbose_beats_file_level() {
        assert_eq!(filter_directive(None, "warn", true), "debug");
        assert_eq!(filter_directive(Some("  "), "warn", true), "debug");
    }

    #[test]
    fn test_file_level_is_default() {
        assert_eq!(filter_directive(None, "INFO", false), "info");
    }
}
