//! Hanover Sign Bus Protocol
//!
//! This crate defines the command protocol spoken by Hanover flipdot signs
//! over their shared RS-485 link. Every sign on the bus sees every frame;
//! the address nibble selects the recipient and address 0 is used for
//! broadcast commands. The link is fire-and-forget: signs never answer.
//!
//! # Protocol Overview
//!
//! Frames are ASCII hex apart from the two control bytes:
//! ```text
//! ┌───────┬─────┬──────┬──────────────┬─────┬──────────┐
//! │ START │ CMD │ ADDR │ PAYLOAD      │ END │ CHECKSUM │
//! │ 0x02  │ 1 h │ 1 h  │ 0..N hex     │0x03 │ 2 hex    │
//! └───────┴─────┴──────┴──────────────┴─────┴──────────┘
//! ```
//!
//! The checksum makes every byte after START (the checksum value included)
//! sum to zero modulo 256.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod frame;
pub mod image;
pub mod messages;

pub use frame::{checksum, encode, Frame, FrameError, END_BYTE, START_BYTE};
pub use image::{encode_image, pack_columns, padded_rows, ImageError, ImageLayout, PixelMatrix};
pub use messages::{Address, Command, Packet};
