//! Structured Logging Configuration
//!
//! Provides configurable logging with:
//! - JSON output for production (`format = "json"` in `[logging]`)
//! - Human-readable output for development (default)
//!
//! # Usage
//!
//! ```rust,ignore
//! use rp_common::logging::{init_logging_with, startup_logging, LogFormat};
//!
//! fn main() {
//!     let config = {
//!         let _startup = startup_logging("rp-dev");
//!         load_config()?
//!     };
//!     init_logging_with("rp-dev", LogFormat::Json, &config.logging.level);
//!
//!     tracing::info!(application_id = %id, "Application created");
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Standard log level filter (default: info)
//!   Examples: `RUST_LOG=debug`, `RUST_LOG=rp_platform=trace,mongodb=warn`

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Anything other than "json" (case-insensitive) is text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Ok(Self::Text)
        }
    }
}

/// Text logging for the current thread until the guard drops.
///
/// Covers start-up work that runs before the configured format and level are
/// known, such as loading configuration. RUST_LOG applies, default INFO.
pub fn startup_logging(service_name: &str) -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::registry()
        .with(build_filter("info"))
        .with(fmt::layer().with_target(true).with_ansi(true));
    let guard = tracing::subscriber::set_default(subscriber);
    tracing::debug!(service = service_name, "Start-up logging active");
    guard
}

/// Initialize logging with an explicit format and fallback level.
///
/// RUST_LOG still wins over `default_level` when it is set.
pub fn init_logging_with(service_name: &str, format: LogFormat, default_level: &str) {
    let env_filter = build_filter(default_level);

    match format {
        LogFormat::Json => init_json_logging(env_filter),
        LogFormat::Text => init_text_logging(env_filter),
    }

    tracing::debug!(service = service_name, ?format, "Logging initialized");
}

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize JSON logging for production.
fn init_json_logging(env_filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(false)
                .with_target(true)
                .flatten_event(true)
                .with_span_events(FmtSpan::CLOSE)
        )
        .init();
}

/// Initialize human-readable text logging for development.
fn init_text_logging(env_filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(true)
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    #[test]
    fn test_filter_falls_back_on_bad_level() {
        // Just verify a filter can always be built
        let filter = build_filter("not a [valid filter");
        drop(filter);
    }

    #[test]
    fn test_startup_logging_is_thread_scoped() {
        let first = startup_logging("test");
        tracing::info!("during start-up");
        drop(first);

        // No global subscriber was claimed, so it can be installed again
        let _second = startup_logging("test");
    }
}
