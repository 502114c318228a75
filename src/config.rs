//! Process configuration, read once from flags and environment at startup.

use clap::{Parser, ValueEnum};

/// User records HTTP service.
#[derive(Parser, Debug, Clone)]
#[command(name = "user-records", version)]
pub struct Config {
    /// Interface to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite connection URL, e.g. `sqlite://users.db` or `sqlite::memory:`.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://users.db")]
    pub database_url: String,

    /// Upper bound on pooled connections for file databases.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Log line format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
