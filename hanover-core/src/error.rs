//! Error types for sign configuration and dispatch

use alloc::string::String;
use core::fmt;

/// A sign descriptor failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sign name is empty
    EmptyName,
    /// Bus address does not fit in a nibble
    AddressOutOfRange(u8),
    /// Width or height is zero
    ZeroDimension { width: usize, height: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyName => write!(f, "sign name is empty"),
            ConfigError::AddressOutOfRange(address) => {
                write!(f, "sign address {} is outside 0-15", address)
            }
            ConfigError::ZeroDimension { width, height } => {
                write!(f, "sign size {}x{} has a zero dimension", width, height)
            }
        }
    }
}

/// An image was rejected by a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignError {
    /// Image size differs from the sign's; images are never cropped or
    /// stretched to fit
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignError::DimensionMismatch {
                expected_width,
                expected_height,
                width,
                height,
            } => write!(
                f,
                "{}x{} image incompatible with {}x{} sign",
                width, height, expected_width, expected_height
            ),
        }
    }
}

/// Controller errors, generic over the transport's error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<E> {
    /// A sign with this name is already registered
    DuplicateSign(String),
    /// No sign name given and the registry does not hold exactly one sign
    AmbiguousTarget { registered: usize },
    /// No sign registered under this name
    UnknownSign(String),
    /// Sign descriptor failed validation
    InvalidSign(ConfigError),
    /// Image rejected by the target sign
    Sign(SignError),
    /// The transport failed to take the frame
    Transport(E),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Error::InvalidSign(e)
    }
}

impl<E> From<SignError> for Error<E> {
    fn from(e: SignError) -> Self {
        Error::Sign(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateSign(name) => write!(f, "sign '{}' already exists", name),
            Error::AmbiguousTarget { registered } => write!(
                f,
                "cannot determine which sign to address ({} registered)",
                registered
            ),
            Error::UnknownSign(name) => write!(f, "no sign named '{}'", name),
            Error::InvalidSign(e) => write!(f, "invalid sign: {}", e),
            Error::Sign(e) => write!(f, "{}", e),
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for SignError {}
