//! Command codes and packets for the Hanover sign bus
//!
//! Packets come in two shapes:
//! - Broadcast commands, sent to address 0 and obeyed by every sign
//! - Image writes, addressed to one sign and carrying an encoded bitmap

use alloc::vec::Vec;

use crate::frame::{Frame, FrameError, MAX_NIBBLE};
use crate::image::{encode_image, ImageLayout, PixelMatrix};

/// Commands understood by Hanover signs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Replace the displayed bitmap
    WriteImage = 1,
    /// Start cycling the built-in test pattern
    StartTestSigns = 3,
    /// Stop the test pattern
    StopTestSigns = 12,
}

impl Command {
    /// Wire code of this command
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Bus address of a sign (0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    /// Address used by broadcast commands
    pub const BROADCAST: Address = Address(0);

    /// Create an address, rejecting values that do not fit in a nibble
    pub fn new(value: u8) -> Result<Self, FrameError> {
        if value > MAX_NIBBLE {
            return Err(FrameError::AddressOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Raw nibble value
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Address {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for u8 {
    fn from(address: Address) -> u8 {
        address.0
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A packet ready to be framed and sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// Command for every sign on the bus
    Broadcast(Command),
    /// Bitmap for one sign; `payload` is the ASCII hex produced by
    /// [`encode_image`]
    Image { address: Address, payload: Vec<u8> },
}

impl Packet {
    /// All signs start their test sequence
    pub fn start_test_signs() -> Self {
        Packet::Broadcast(Command::StartTestSigns)
    }

    /// All signs stop their test sequence
    pub fn stop_test_signs() -> Self {
        Packet::Broadcast(Command::StopTestSigns)
    }

    /// Write `image` to the sign at `address`
    ///
    /// No orientation correction or size check happens here; that is the
    /// job of the sign descriptor.
    pub fn image(address: Address, image: &PixelMatrix, layout: ImageLayout) -> Self {
        Packet::Image {
            address,
            payload: encode_image(image, layout),
        }
    }

    /// Command this packet carries
    pub fn command(&self) -> Command {
        match self {
            Packet::Broadcast(command) => *command,
            Packet::Image { .. } => Command::WriteImage,
        }
    }

    /// Destination address
    pub fn address(&self) -> Address {
        match self {
            Packet::Broadcast(_) => Address::BROADCAST,
            Packet::Image { address, .. } => *address,
        }
    }

    /// Payload bytes (empty for broadcasts)
    pub fn payload(&self) -> &[u8] {
        match self {
            Packet::Broadcast(_) => &[],
            Packet::Image { payload, .. } => payload.as_slice(),
        }
    }

    /// Convert into a frame
    ///
    /// Infallible: command codes are constants and addresses are
    /// range-checked when they are created.
    pub fn to_frame(&self) -> Frame {
        Frame::from_parts(
            self.command().code(),
            self.address().value(),
            self.payload().to_vec(),
        )
    }

    /// Encode into wire bytes
    pub fn encode(&self) -> Vec<u8> {
        self.to_frame().encode()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_codes() {
        assert_eq!(Command::WriteImage.code(), 1);
        assert_eq!(Command::StartTestSigns.code(), 3);
        assert_eq!(Command::StopTestSigns.code(), 12);
    }

    #[test]
    fn test_address_range() {
        assert_eq!(Address::new(15).map(Address::value), Ok(15));
        assert_eq!(Address::new(16), Err(FrameError::AddressOutOfRange(16)));
        assert_eq!(Address::try_from(0u8), Ok(Address::BROADCAST));
    }

    #[test]
    fn test_start_test_signs_bytes() {
        assert_eq!(Packet::start_test_signs().encode(), b"\x0230\x039A");
    }

    #[test]
    fn test_stop_test_signs_bytes() {
        assert_eq!(Packet::stop_test_signs().encode(), b"\x02C0\x038A");
    }

    #[test]
    fn test_image_packet_bytes() {
        let mut image = PixelMatrix::new(3, 2);
        image.set(0, 0, true);

        let packet = Packet::image(Address::new(1).unwrap(), &image, ImageLayout::Canonical);
        assert_eq!(packet.command(), Command::WriteImage);
        assert_eq!(packet.encode(), b"\x0211020100\x0378");
    }

    #[test]
    fn test_broadcast_frame_parts() {
        let frame = Packet::stop_test_signs().to_frame();
        assert_eq!(frame.command(), 12);
        assert_eq!(frame.address(), 0);
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn test_image_frame_parts() {
        let mut image = PixelMatrix::new(8, 1);
        image.set(7, 0, true);
        let packet = Packet::image(Address::new(9).unwrap(), &image, ImageLayout::Canonical);

        let frame = packet.to_frame();
        assert_eq!(frame.command(), Command::WriteImage.code());
        assert_eq!(frame.address(), 9);
        assert_eq!(frame.payload(), b"0180");
        assert_eq!(packet.payload(), frame.payload());
    }
}
