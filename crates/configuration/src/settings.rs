use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataSource,
    pub server: Server,
    pub dashboard: Dashboard,
}

impl Config {
    /// Rejects configurations that would only fail later at load or serve time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.top_trades == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.top_trades must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the trade spreadsheet lives.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSource {
    /// Path to the CSV export of the trade tape, read once at startup.
    pub path: PathBuf,
}

/// Parameters for the dashboard's HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// The interface to bind, e.g. "0.0.0.0".
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Server {
    /// The bind address as a `SocketAddr`.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// Display parameters for the rendered views.
#[derive(Debug, Clone, Deserialize)]
pub struct Dashboard {
    /// How many of the day's largest trades to show.
    pub top_trades: usize,
}
