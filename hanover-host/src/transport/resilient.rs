//! Reconnecting transport for stream-oriented links
//!
//! A network serial bridge drops its TCP connection whenever it restarts.
//! Instead of surfacing that to the caller, [`ResilientTransport`] throws
//! the connection away, waits, reconnects and sends the frame again.
//! Only reset/broken-pipe class failures are retried; anything else
//! propagates immediately.
//!
//! With an unbounded policy the retry loop blocks until a send succeeds and
//! cannot be cancelled. Callers that need a deadline should use a bounded
//! policy.

use std::time::Duration;

use tracing::{debug, warn};

use hanover_hal::{Clock, Connect, Transport, TransportError};

/// How often and how patiently to retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait between attempts
    pub backoff: Duration,
    /// Total attempts per operation; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: Duration::from_secs(1),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Give up after `max_attempts` attempts
    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..Self::default()
        }
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

type ConnectionError<C> = <<C as Connect>::Connection as Transport>::Error;

/// Transport that survives dropped connections
pub struct ResilientTransport<C: Connect, K> {
    connector: C,
    clock: K,
    policy: RetryPolicy,
    connection: Option<C::Connection>,
}

impl<C: Connect, K: Clock> ResilientTransport<C, K> {
    /// Create without connecting; the first write opens the connection
    pub fn new(connector: C, clock: K, policy: RetryPolicy) -> Self {
        Self {
            connector,
            clock,
            policy,
            connection: None,
        }
    }

    /// Create and open the first connection
    ///
    /// A failure here is returned as-is, without retrying.
    pub fn connect(
        mut connector: C,
        clock: K,
        policy: RetryPolicy,
    ) -> Result<Self, ConnectionError<C>> {
        let connection = connector.connect()?;
        Ok(Self {
            connector,
            clock,
            policy,
            connection: Some(connection),
        })
    }

    /// Whether a connection is currently open
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Retry policy in use
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Connector used for reconnects
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Clock used for backoff
    pub fn clock(&self) -> &K {
        &self.clock
    }

    fn connection(&mut self) -> Result<&mut C::Connection, ConnectionError<C>> {
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => self.connector.connect()?,
        };
        Ok(self.connection.insert(connection))
    }

    fn with_retry<F>(&mut self, mut op: F) -> Result<(), ConnectionError<C>>
    where
        F: FnMut(&mut C::Connection) -> Result<(), ConnectionError<C>>,
    {
        let mut attempts = 0u32;
        loop {
            attempts += 1;

            let error = match self.connection() {
                Ok(connection) => match op(connection) {
                    Ok(()) => return Ok(()),
                    Err(e) if e.kind().is_reconnectable() => {
                        self.connection = None;
                        e
                    }
                    Err(e) => return Err(e),
                },
                Err(e) if e.kind().is_transient_connect_failure() => e,
                Err(e) => return Err(e),
            };

            if self.policy.exhausted(attempts) {
                warn!(attempts, error = ?error, "giving up on sign bus connection");
                return Err(error);
            }

            warn!(
                attempt = attempts,
                kind = ?error.kind(),
                backoff = ?self.policy.backoff,
                "sign bus connection lost, reconnecting"
            );
            self.clock.sleep(self.policy.backoff);
        }
    }
}

impl<C: Connect, K: Clock> Transport for ResilientTransport<C, K> {
    type Error = ConnectionError<C>;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        // Flush inside the retried operation so a frame lost in a dead
        // connection's buffer is resent on the new one
        self.with_retry(|connection| {
            connection.write_frame(frame)?;
            connection.flush()
        })?;
        debug!(len = frame.len(), "frame sent");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.with_retry(|connection| connection.flush())
    }
}
