//! Command line and environment configuration.
//!
//! A `.env` file in the working directory is loaded before parsing, so every
//! option can also come from there.

use clap::Parser;
use std::net::SocketAddr;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_HOST: &str = "CARCRATE_HOST";
pub const ENV_PORT: &str = "CARCRATE_PORT";
pub const ENV_LOG: &str = "CARCRATE_LOG";

pub const DEFAULT_LOG_FILTER: &str = "info,carcrate=debug";

#[derive(Debug, Clone, Parser)]
#[command(name = "carcrate")]
#[command(version, about = "Car inventory API with criteria filtering", long_about = None)]
pub struct Config {
    /// Database connection URL
    #[arg(long, env = ENV_DATABASE_URL, default_value = "sqlite://carcrate.db?mode=rwc")]
    pub database_url: String,

    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST, default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT, default_value_t = 3000)]
    pub port: u16,

    /// Log filter directive, e.g. `info,carcrate=trace`. Falls back to `RUST_LOG`.
    #[arg(long, env = ENV_LOG)]
    pub log: Option<String>,
}

impl Config {
    /// # Errors
    ///
    /// Returns an error when `host` is not an IP address.
    pub fn bind_address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn log_filter(&self) -> String {
        self.log
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}
