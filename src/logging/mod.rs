// Logging module - tracing subscriber setup
//
// Results go to stdout, so human-readable logs are written to stderr.
// File logging is optional: a JSON layer behind a non-blocking rolling
// appender, for structured log parsing.
//
// Precedence for the filter: RUST_LOG env var > -v flags > config file level

use crate::config::{LogRotation, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level implied by repeated `-v` flags, falling back to the configured level
pub fn effective_level(configured: &str, verbosity: u8) -> &str {
    match verbosity {
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// Returns the file writer guard when file logging is active. The guard must
/// be kept alive for the duration of the program to ensure logs flush.
pub fn init(config: &LoggingConfig, verbosity: u8) -> Option<WorkerGuard> {
    let default_filter = format!("statfmt={}", effective_level(&config.level, verbosity));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if config.file_enabled {
        match std::fs::create_dir_all(&config.file_dir) {
            Ok(()) => {
                let file_appender = match config.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&config.file_dir, &config.file_prefix)
                    }
                };

                // Writes happen in a background thread
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                // Fall back to stderr-only logging
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level() {
        assert_eq!(effective_level("warn", 0), "warn");
        assert_eq!(effective_level("warn", 1), "debug");
        assert_eq!(effective_level("error", 2), "trace");
        assert_eq!(effective_level("info", 5), "trace");
    }
}
