//! Connections to a network serial bridge

use std::io;
use std::net::TcpStream;

use tracing::info;

use hanover_hal::Connect;

use super::writer::WriterTransport;

/// Opens TCP connections to a serial-over-IP bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpConnector {
    host: String,
    port: u16,
}

impl TcpConnector {
    /// Connector for `host:port`
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Bridge host name or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Bridge port
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Connect for TcpConnector {
    type Connection = WriterTransport<TcpStream>;

    fn connect(&mut self) -> Result<Self::Connection, io::Error> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))?;
        // Send each frame as soon as it is written
        stream.set_nodelay(true)?;

        info!(host = %self.host, port = self.port, "connected to sign bus bridge");
        Ok(WriterTransport::new(stream))
    }
}
