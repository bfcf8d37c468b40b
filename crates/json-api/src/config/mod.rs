//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    storage::StorageConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod storage;

/// Frameshop JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "frameshop-json", about = "Frameshop JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging and metrics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Image storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // .env is optional
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "frameshop-json",
            "--database-url",
            "postgres://localhost/frameshop",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.storage.media_root.to_string_lossy(), "./media");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert!(config.observability.metrics_enabled);

        Ok(())
    }

    #[test]
    fn json_log_format_is_accepted() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "frameshop-json",
            "--database-url",
            "postgres://localhost/frameshop",
            "--log-format",
            "json",
        ])?;

        assert!(matches!(
            config.logging.log_format,
            observability::LogFormat::Json
        ));

        Ok(())
    }

    #[test]
    fn metrics_can_be_switched_off() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "frameshop-json",
            "--database-url",
            "postgres://localhost/frameshop",
            "--metrics-enabled",
            "false",
        ])?;

        assert!(!config.observability.metrics_enabled);

        Ok(())
    }
}
