//! Bus transports
//!
//! - [`WriterTransport`]: any [`std::io::Write`] sink, failures propagate
//! - [`SerialTransport`]: a [`WriterTransport`] over a serial port
//! - [`ResilientTransport`]: reconnects and retries on dropped connections
//! - [`TcpConnector`]: connections to a network serial bridge

pub mod resilient;
pub mod tcp;
pub mod writer;

use std::io;
use std::time::Duration;

use tracing::info;

use hanover_hal::{SerialConfig, Transport};

use crate::clock::SystemClock;
use crate::config::TransportConfig;
use crate::error::HostError;

pub use resilient::{ResilientTransport, RetryPolicy};
pub use tcp::TcpConnector;
pub use writer::{open_serial, SerialTransport, WriterTransport, BLOCKING_WRITE_TIMEOUT};

/// The transports a configuration file can select
pub enum HostTransport {
    /// Direct serial connection
    Serial(SerialTransport),
    /// Reconnecting TCP connection to a serial bridge
    Tcp(ResilientTransport<TcpConnector, SystemClock>),
}

impl HostTransport {
    /// Open the transport described by `config`
    pub fn open(config: &TransportConfig) -> Result<Self, HostError> {
        match config {
            TransportConfig::Serial {
                port,
                baud_rate,
                write_timeout_ms,
            } => {
                let serial = open_serial(
                    port,
                    &SerialConfig::with_baud_rate(*baud_rate),
                    write_timeout_ms.map(Duration::from_millis),
                )?;
                Ok(HostTransport::Serial(serial))
            }
            TransportConfig::Tcp { host, port, retry } => {
                let connector = TcpConnector::new(host.clone(), *port);
                let transport =
                    ResilientTransport::connect(connector, SystemClock::new(), (*retry).into())
                        .map_err(|source| HostError::Connect {
                            host: host.clone(),
                            port: *port,
                            source,
                        })?;
                info!(%host, port, "using resilient tcp transport");
                Ok(HostTransport::Tcp(transport))
            }
        }
    }
}

impl core::fmt::Debug for HostTransport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HostTransport::Serial(_) => f.write_str("HostTransport::Serial"),
            HostTransport::Tcp(_) => f.write_str("HostTransport::Tcp"),
        }
    }
}

impl Transport for HostTransport {
    type Error = io::Error;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        match self {
            HostTransport::Serial(serial) => serial.write_frame(frame),
            HostTransport::Tcp(tcp) => tcp.write_frame(frame),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        match self {
            HostTransport::Serial(serial) => serial.flush(),
            HostTransport::Tcp(tcp) => tcp.flush(),
        }
    }
}
