//! Error types for host-side setup and dispatch

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading configuration, opening transports or driving signs
#[derive(Debug, Error)]
pub enum HostError {
    /// Configuration file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration is not valid TOML or has the wrong shape
    #[error("invalid config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// Serial device could not be opened
    #[error("failed to open serial port {port}: {source}")]
    OpenSerial {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// Initial connection to a network bridge failed
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Sign registry or dispatch failure
    #[error(transparent)]
    Controller(#[from] hanover_core::Error<io::Error>),
}
