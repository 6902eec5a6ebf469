//! Sign bus transport abstractions
//!
//! The Hanover protocol is fire-and-forget: the controller only ever
//! writes complete frames, so a transport is a byte sink plus a way to
//! classify its failures.

/// Broad classification of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Peer reset the connection
    ConnectionReset,
    /// Connection aborted locally
    ConnectionAborted,
    /// Write on a closed pipe or socket
    BrokenPipe,
    /// Transport has no live connection
    NotConnected,
    /// Peer refused a new connection
    ConnectionRefused,
    /// Operation timed out
    TimedOut,
    /// Anything else
    Other,
}

impl ErrorKind {
    /// Whether a stream-oriented transport should drop its connection,
    /// reconnect and retry after this failure
    pub fn is_reconnectable(self) -> bool {
        matches!(
            self,
            ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::BrokenPipe
                | ErrorKind::NotConnected
        )
    }

    /// Whether a failed connection attempt is worth repeating
    ///
    /// Wider than [`is_reconnectable`](Self::is_reconnectable): a bridge that
    /// is restarting refuses connections or times out for a while.
    pub fn is_transient_connect_failure(self) -> bool {
        self.is_reconnectable()
            || matches!(self, ErrorKind::ConnectionRefused | ErrorKind::TimedOut)
    }
}

/// Error type produced by a [`Transport`]
pub trait TransportError: core::fmt::Debug {
    /// Classify this error
    fn kind(&self) -> ErrorKind;
}

/// Frame sink
///
/// Every call to [`write_frame`](Transport::write_frame) carries one
/// complete frame; the write is treated as atomic at frame granularity.
pub trait Transport {
    /// Error type for write operations
    type Error: TransportError;

    /// Write one complete frame to the bus
    ///
    /// Blocks until all data has been handed to the sink or an error occurs.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        (**self).write_frame(frame)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

/// Factory for transport connections
///
/// Used by reconnecting transports to replace a connection that failed.
pub trait Connect {
    /// Connection type produced
    type Connection: Transport;

    /// Open a new connection
    fn connect(&mut self) -> Result<Self::Connection, <Self::Connection as Transport>::Error>;
}

impl TransportError for core::convert::Infallible {
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

#[cfg(feature = "std")]
impl TransportError for std::io::Error {
    fn kind(&self) -> ErrorKind {
        use std::io::ErrorKind as Io;

        match std::io::Error::kind(self) {
            Io::ConnectionReset => ErrorKind::ConnectionReset,
            Io::ConnectionAborted => ErrorKind::ConnectionAborted,
            Io::BrokenPipe => ErrorKind::BrokenPipe,
            Io::NotConnected => ErrorKind::NotConnected,
            Io::ConnectionRefused => ErrorKind::ConnectionRefused,
            Io::TimedOut => ErrorKind::TimedOut,
            _ => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconnectable_kinds() {
        assert!(ErrorKind::ConnectionReset.is_reconnectable());
        assert!(ErrorKind::BrokenPipe.is_reconnectable());
        assert!(ErrorKind::ConnectionAborted.is_reconnectable());
        assert!(ErrorKind::NotConnected.is_reconnectable());
        assert!(!ErrorKind::ConnectionRefused.is_reconnectable());
        assert!(!ErrorKind::TimedOut.is_reconnectable());
        assert!(!ErrorKind::Other.is_reconnectable());
    }

    #[test]
    fn test_transient_connect_failures() {
        assert!(ErrorKind::ConnectionRefused.is_transient_connect_failure());
        assert!(ErrorKind::TimedOut.is_transient_connect_failure());
        assert!(ErrorKind::BrokenPipe.is_transient_connect_failure());
        assert!(!ErrorKind::Other.is_transient_connect_failure());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_io_error_classification() {
        let err = std::io::Error::from(std::io::ErrorKind::BrokenPipe);
        assert_eq!(TransportError::kind(&err), ErrorKind::BrokenPipe);

        let err = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert_eq!(TransportError::kind(&err), ErrorKind::Other);
    }
}
