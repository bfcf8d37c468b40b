//! Logging and request metrics settings

use clap::{ArgAction, Args, ValueEnum};

/// Shape of each log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line text for terminals.
    Compact,

    /// One JSON object per event, span context included.
    Json,
}

#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` holds no valid filter
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Serve Prometheus text exposition on `/metrics`
    #[arg(long, env = "METRICS_ENABLED", action = ArgAction::Set, default_value_t = true)]
    pub metrics_enabled: bool,

    /// Requests slower than this are logged at warn level
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}
