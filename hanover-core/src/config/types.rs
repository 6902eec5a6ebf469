//! Configuration type definitions
//!
//! These types describe the signs hanging off one bus, as read from the
//! deployment's configuration file.

use alloc::string::{String, ToString};

use hanover_protocol::ImageLayout;

use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Check a sign name; any non-empty string is accepted
pub fn sign_name(name: &str) -> Result<String, ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::EmptyName);
    }
    Ok(name.to_string())
}

/// One sign on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignConfig {
    /// Friendly name, unique per controller
    pub name: String,
    /// Bus address (0-15)
    pub address: u8,
    /// Width in dots
    pub width: usize,
    /// Height in dots
    pub height: usize,
    /// Sign is mounted upside down
    #[cfg_attr(feature = "serde", serde(default))]
    pub flip: bool,
    /// Bit layout the sign's firmware expects
    #[cfg_attr(feature = "serde", serde(default))]
    pub layout: ImageLayout,
}

impl SignConfig {
    /// Upright sign using the canonical bit layout
    pub fn new(name: &str, address: u8, width: usize, height: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            name: sign_name(name)?,
            address,
            width,
            height,
            flip: false,
            layout: ImageLayout::Canonical,
        })
    }
}
