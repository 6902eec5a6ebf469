//! Frame encoding for the Hanover sign bus.
//!
//! Frame format:
//! - START (1 byte): 0x02
//! - COMMAND (1 byte): ASCII uppercase hex digit
//! - ADDRESS (1 byte): ASCII uppercase hex digit
//! - PAYLOAD (0-N bytes): already ASCII hex, copied verbatim
//! - END (1 byte): 0x03
//! - CHECKSUM (2 bytes): ASCII uppercase hex of the modular checksum over
//!   START..=END

use alloc::vec::Vec;

/// Start of every frame
pub const START_BYTE: u8 = 0x02;

/// End of the frame body, followed by the checksum
pub const END_BYTE: u8 = 0x03;

/// Largest value a command or address nibble can carry
pub const MAX_NIBBLE: u8 = 0x0F;

/// Bytes a frame adds around its payload (START, CMD, ADDR, END, 2x checksum)
pub const FRAME_OVERHEAD: usize = 6;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Frame construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Command code does not fit in a nibble
    CommandOutOfRange(u8),
    /// Address does not fit in a nibble
    AddressOutOfRange(u8),
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::CommandOutOfRange(c) => write!(f, "command {} does not fit in a nibble", c),
            FrameError::AddressOutOfRange(a) => write!(f, "address {} does not fit in a nibble", a),
        }
    }
}

/// Modular checksum over an in-progress frame
///
/// `data` starts with the START byte, which is excluded from the sum. The
/// result is the two's-complement negation of the clipped sum, so all frame
/// bytes after START plus the checksum add up to zero modulo 256.
pub fn checksum(data: &[u8]) -> u8 {
    let total = data
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte))
        .wrapping_sub(START_BYTE);
    (total ^ 0xFF).wrapping_add(1)
}

/// Uppercase ASCII hex digit for the low nibble of `value`
pub(crate) fn hex_digit(value: u8) -> u8 {
    HEX_DIGITS[(value & 0x0F) as usize]
}

/// Append `byte` as two uppercase ASCII hex digits
pub(crate) fn push_hex(out: &mut Vec<u8>, byte: u8) {
    out.push(hex_digit(byte >> 4));
    out.push(hex_digit(byte));
}

/// A frame ready for encoding
///
/// Command and address are guaranteed to fit in a nibble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    command: u8,
    address: u8,
    payload: Vec<u8>,
}

impl Frame {
    /// Create a new frame with the given command, address and payload
    pub fn new(command: u8, address: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if command > MAX_NIBBLE {
            return Err(FrameError::CommandOutOfRange(command));
        }
        if address > MAX_NIBBLE {
            return Err(FrameError::AddressOutOfRange(address));
        }

        Ok(Self {
            command,
            address,
            payload: payload.to_vec(),
        })
    }

    /// Create a frame with no payload
    pub fn empty(command: u8, address: u8) -> Result<Self, FrameError> {
        Self::new(command, address, &[])
    }

    /// Build from parts already known to be in range
    pub(crate) fn from_parts(command: u8, address: u8, payload: Vec<u8>) -> Self {
        debug_assert!(command <= MAX_NIBBLE && address <= MAX_NIBBLE);
        Self {
            command,
            address,
            payload,
        }
    }

    /// Command nibble
    pub fn command(&self) -> u8 {
        self.command
    }

    /// Address nibble
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Payload bytes (ASCII hex for every defined command)
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Number of bytes [`encode`](Self::encode) produces
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Append the encoded frame to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        let start = out.len();
        out.reserve(self.encoded_len());

        out.push(START_BYTE);
        out.push(hex_digit(self.command));
        out.push(hex_digit(self.address));
        out.extend_from_slice(&self.payload);
        out.push(END_BYTE);

        let sum = checksum(&out[start..]);
        push_hex(out, sum);
    }

    /// Encode this frame into a new buffer
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }
}

/// Encode a single frame from raw parts
///
/// An absent or empty payload produces a frame with nothing between the
/// address digit and END.
pub fn encode(command: u8, address: u8, payload: Option<&[u8]>) -> Result<Vec<u8>, FrameError> {
    Frame::new(command, address, payload.unwrap_or(&[])).map(|frame| frame.encode())
}
