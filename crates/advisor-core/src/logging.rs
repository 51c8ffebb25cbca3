//! Structured logging setup

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "autocorrelate");
/// // Or with additional fields:
/// trace_time!(start, "autocorrelate", words = result.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Environment variable consulted when `RUST_LOG` is unset
const LOG_ENV_VAR: &str = "ADVISOR_LOG";

/// How log events are written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Compact,
    Json,
}

/// Initialize structured logging
///
/// `log_level` wins over `verbose`. Either may be overridden by `RUST_LOG`
/// or `ADVISOR_LOG`.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    install(env_filter(&default_directive(verbose, log_level)), format)
}

fn default_directive(verbose: bool, log_level: Option<&str>) -> String {
    match log_level {
        Some(level) => filter_directive(level),
        None if verbose => filter_directive("debug"),
        None => filter_directive("warn"),
    }
}

/// Bare levels apply to this crate only; full directives pass through.
fn filter_directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("advisor_core={}", level)
    }
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV_VAR))
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber; fails if one is already set
fn install(filter: EnvFilter, format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
    });
    let compact = (format == LogFormat::Compact).then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(compact)
        .try_init()?;
    Ok(())
}
