//! TOML configuration for a sign bus
//!
//! ```toml
//! [transport]
//! kind = "tcp"
//! host = "10.0.0.5"
//! port = 4001
//!
//! [[sign]]
//! name = "front"
//! address = 1
//! width = 86
//! height = 7
//! flip = true
//! ```
//!
//! Only the shape of the file is checked here; sign addresses, sizes and
//! duplicate names are validated when the controller is built.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use hanover_core::SignConfig;
use hanover_hal::serial::HANOVER_BAUD_RATE;

use crate::error::HostError;
use crate::transport::RetryPolicy;

/// Everything needed to build a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// How to reach the bus
    pub transport: TransportConfig,
    /// Signs on the bus
    #[serde(default, rename = "sign")]
    pub signs: Vec<SignConfig>,
}

/// Bus transport selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Local serial device; write failures propagate
    Serial {
        port: String,
        #[serde(default = "default_baud_rate")]
        baud_rate: u32,
        /// Write limit; writes block when absent
        #[serde(default)]
        write_timeout_ms: Option<u64>,
    },
    /// Network serial bridge; dropped connections are re-established
    Tcp {
        host: String,
        port: u16,
        #[serde(default)]
        retry: RetryConfig,
    },
}

fn default_baud_rate() -> u32 {
    HANOVER_BAUD_RATE
}

/// Reconnect behaviour for network transports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay between reconnect attempts
    pub backoff_ms: u64,
    /// Give up after this many attempts; retry forever when absent
    pub max_attempts: Option<u32>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            backoff_ms: policy.backoff.as_millis() as u64,
            max_attempts: policy.max_attempts,
        }
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(config: RetryConfig) -> Self {
        RetryPolicy {
            backoff: Duration::from_millis(config.backoff_ms),
            max_attempts: config.max_attempts,
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(input: &str) -> Result<HostConfig, HostError> {
    Ok(toml::from_str(input)?)
}

/// Read and parse a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<HostConfig, HostError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| HostError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&input)?;
    info!(
        path = %path.display(),
        signs = config.signs.len(),
        "loaded sign configuration"
    );
    Ok(config)
}
