//! Sign registry and bus dispatch
//!
//! The controller owns the transport and the set of known signs. Every
//! operation runs to completion on the caller's thread; nothing is queued.
//! Sharing one controller between threads needs an outer lock.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use hanover_hal::{Clock, Transport};
use hanover_protocol::{Packet, PixelMatrix};

use crate::config::SignConfig;
use crate::error::Error;
use crate::sign::Sign;

/// Delay between repeated start-test commands in [`Controller::run_test_sequence`]
pub const TEST_SEQUENCE_INTERVAL: Duration = Duration::from_secs(1);

/// Controller for one sign bus
#[derive(Debug)]
pub struct Controller<T> {
    transport: T,
    signs: Vec<Sign>,
}

impl<T: Transport> Controller<T> {
    /// Create a controller with no signs registered
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            signs: Vec::new(),
        }
    }

    /// Create a controller and register every configured sign
    pub fn from_config(configs: &[SignConfig], transport: T) -> Result<Self, Error<T::Error>> {
        let mut controller = Self::new(transport);
        for config in configs {
            controller.add_sign(Sign::from_config(config)?)?;
        }
        Ok(controller)
    }

    /// Register a sign
    ///
    /// Names must be unique. Addresses are not checked: two signs may
    /// deliberately share an address to mirror each other.
    pub fn add_sign(&mut self, sign: Sign) -> Result<(), Error<T::Error>> {
        if self.sign(sign.name()).is_some() {
            return Err(Error::DuplicateSign(sign.name().to_string()));
        }
        self.signs.push(sign);
        Ok(())
    }

    /// Registered signs
    pub fn signs(&self) -> impl Iterator<Item = &Sign> {
        self.signs.iter()
    }

    /// Look up a sign by name
    pub fn sign(&self, name: &str) -> Option<&Sign> {
        self.signs.iter().find(|sign| sign.name() == name)
    }

    /// Pick the sign an operation is aimed at
    ///
    /// Without a name this only succeeds when exactly one sign is
    /// registered.
    pub fn resolve_sign(&self, name: Option<&str>) -> Result<&Sign, Error<T::Error>> {
        match name {
            Some(name) => self
                .sign(name)
                .ok_or_else(|| Error::UnknownSign(String::from(name))),
            None => match self.signs.as_slice() {
                [only] => Ok(only),
                signs => Err(Error::AmbiguousTarget {
                    registered: signs.len(),
                }),
            },
        }
    }

    /// Show `image` on a sign
    pub fn draw(&mut self, image: &PixelMatrix, name: Option<&str>) -> Result<(), Error<T::Error>> {
        let packet = self.resolve_sign(name)?.to_packet(image)?;
        self.send(&packet)
    }

    /// Put every sign on the bus into its test pattern
    ///
    /// Signs do not need to be registered for this to reach them.
    pub fn start_test_signs(&mut self) -> Result<(), Error<T::Error>> {
        self.send(&Packet::start_test_signs())
    }

    /// Stop the test pattern on every sign on the bus
    pub fn stop_test_signs(&mut self) -> Result<(), Error<T::Error>> {
        self.send(&Packet::stop_test_signs())
    }

    /// Run the test pattern for `duration`
    ///
    /// Re-issues the start command every [`TEST_SEQUENCE_INTERVAL`] until
    /// `duration` has passed on `clock`. The stop command is sent even if a
    /// start command failed; the first error is returned afterwards.
    pub fn run_test_sequence<C: Clock>(
        &mut self,
        duration: Duration,
        clock: &mut C,
    ) -> Result<(), Error<T::Error>> {
        let started = clock.now();

        let result = loop {
            if let Err(e) = self.start_test_signs() {
                break Err(e);
            }

            let elapsed = clock.now().saturating_sub(started);
            if elapsed >= duration {
                break Ok(());
            }
            clock.sleep(TEST_SEQUENCE_INTERVAL.min(duration - elapsed));

            if clock.now().saturating_sub(started) >= duration {
                break Ok(());
            }
        };

        let stopped = self.stop_test_signs();
        result.and(stopped)
    }

    /// Encode `packet` and hand it to the transport
    pub fn send(&mut self, packet: &Packet) -> Result<(), Error<T::Error>> {
        let frame = packet.encode();
        self.transport.write_frame(&frame).map_err(Error::Transport)?;
        self.transport.flush().map_err(Error::Transport)
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport, mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Tear down the controller, returning the transport
    pub fn into_transport(self) -> T {
        self.transport
    }
}
