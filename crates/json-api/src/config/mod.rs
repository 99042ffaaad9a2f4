//! Server configuration module

use clap::{CommandFactory, Parser, error::ErrorKind};

use crate::config::{
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    store::{StoreBackend, StoreConfig},
};

pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod store;

/// Catalog JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "catalog-json", about = "Catalog JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Product store settings.
    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed, or if the
    /// `postgres` store is selected without a database URL.
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()?.validated()
    }

    fn validated(self) -> Result<Self, clap::Error> {
        if self.store.store_backend == StoreBackend::Postgres && self.store.database_url.is_none()
        {
            return Err(Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "--database-url (DATABASE_URL) is required when the store backend is postgres",
            ));
        }

        Ok(self)
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

    fn parse(args: &[&str]) -> Result<ServerConfig, clap::Error> {
        ServerConfig::try_parse_from(std::iter::once("catalog-json").chain(args.iter().copied()))?
            .validated()
    }

    #[test]
    fn memory_backend_needs_no_database_url() -> TestResult {
        let config = parse(&["--store-backend", "memory", "--port", "9000"])?;

        assert_eq!(config.store.store_backend, StoreBackend::Memory);
        assert_eq!(config.socket_addr(), "0.0.0.0:9000");

        Ok(())
    }

    #[test]
    fn postgres_backend_requires_database_url() -> TestResult {
        let mut config = parse(&["--store-backend", "postgres", "--database-url", "postgres://db"])?;

        config.store.database_url = None;

        let result = config.validated();

        assert!(
            matches!(result, Err(ref e) if e.kind() == ErrorKind::MissingRequiredArgument),
            "expected a missing argument error"
        );

        Ok(())
    }

    #[test]
    fn store_timeout_defaults_to_five_seconds() -> TestResult {
        let config = parse(&["--store-backend", "memory"])?;

        assert_eq!(config.store.store_timeout().as_millis(), 5_000);

        Ok(())
    }
}
