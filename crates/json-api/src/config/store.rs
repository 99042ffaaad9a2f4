//! Store Config

use std::time::Duration;

use clap::Args;

/// Which record store backs the products service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreBackend {
    /// `PostgreSQL` via `DATABASE_URL`.
    Postgres,

    /// Process-local store; data is lost on restart.
    Memory,
}

/// Product store settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Store backend (postgres, memory)
    #[arg(long, env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Postgres)]
    pub store_backend: StoreBackend,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Deadline for the store work behind a single request, in milliseconds.
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub store_timeout_ms: u64,
}

impl StoreConfig {
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
