//! Configuration file loading for the matches server.
//!
//! Settings come from a TOML file; every field has a default, so a missing
//! file or a partial one is fine.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,
    /// Messages buffered per feed client before it starts skipping.
    pub broadcast_capacity: usize,
    /// Whether to serve the `/ws` feed and broadcast created matches.
    pub websocket: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            database_path: PathBuf::from("data/matches.db"),
            broadcast_capacity: 100,
            websocket: true,
        }
    }
}

impl ServerConfig {
    /// Default configuration file, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "matches.toml";

    /// Loads the configuration from `path`.
    ///
    /// Returns the default configuration if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::info!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the database lives in memory rather than on disk.
    pub fn in_memory(&self) -> bool {
        self.database_path == Path::new(":memory:")
    }
}
