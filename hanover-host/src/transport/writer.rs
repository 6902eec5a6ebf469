//! Direct transports over `std::io::Write`

use std::io::{self, Write};
use std::time::Duration;

use tracing::{info, trace};

use hanover_hal::{DataBits, Parity, SerialConfig, StopBits, Transport};

use crate::error::HostError;

/// Stands in for "no timeout": serialport always arms one, so a write
/// blocks for at most a day before failing with `TimedOut`
pub const BLOCKING_WRITE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Timeout handed to the serial driver; `None` blocks
pub fn serial_write_timeout(limit: Option<Duration>) -> Duration {
    limit.unwrap_or(BLOCKING_WRITE_TIMEOUT)
}

/// Transport that writes frames straight to an [`io::Write`] sink
///
/// Errors are returned to the caller unchanged.
#[derive(Debug)]
pub struct WriterTransport<W> {
    writer: W,
}

impl<W: Write> WriterTransport<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Underlying writer, mutably
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for WriterTransport<W> {
    type Error = io::Error;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.writer.write_all(frame)?;
        trace!(len = frame.len(), "frame written");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.writer.flush()
    }
}

/// Direct transport over a serial port
pub type SerialTransport = WriterTransport<Box<dyn serialport::SerialPort>>;

/// Open a serial device for the sign bus
///
/// Writes block until the driver has taken the whole frame unless
/// `write_timeout` sets a limit.
pub fn open_serial(
    path: &str,
    config: &SerialConfig,
    write_timeout: Option<Duration>,
) -> Result<SerialTransport, HostError> {
    let data_bits = match config.data_bits {
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    };
    let parity = match config.parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    };
    let stop_bits = match config.stop_bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    };

    let port = serialport::new(path, config.baud_rate)
        .data_bits(data_bits)
        .parity(parity)
        .stop_bits(stop_bits)
        .timeout(serial_write_timeout(write_timeout))
        .open()
        .map_err(|source| HostError::OpenSerial {
            port: path.to_string(),
            source,
        })?;

    info!(port = path, baud = config.baud_rate, "opened serial port");
    Ok(WriterTransport::new(port))
}
