//! Transport-agnostic controller logic for Hanover flipdot signs
//!
//! This crate contains everything between "here is a bitmap for the sign
//! called `front`" and "here are the bytes for the bus":
//!
//! - Sign descriptors (address, size, mounting orientation)
//! - The controller's sign registry and target resolution
//! - Broadcast test-mode commands
//! - Configuration type definitions
//!
//! The bus itself is reached through [`hanover_hal::Transport`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod error;
pub mod sign;

pub use config::{sign_name, SignConfig};
pub use controller::{Controller, TEST_SEQUENCE_INTERVAL};
pub use error::{ConfigError, Error, SignError};
pub use sign::Sign;

pub use hanover_protocol::{ImageLayout, Packet, PixelMatrix};
