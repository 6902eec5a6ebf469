//! Hanover Hardware Abstraction Layer
//!
//! This crate defines the traits the controller logic uses to reach the
//! sign bus. Physical sinks (serial ports, TCP bridges, in-memory buffers)
//! implement them in the integration crate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  hanover-core (Controller, Sign)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hanover-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ serial / io   │       │ resilient TCP │
//! │ (direct)      │       │ (reconnects)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Frame sink
//! - [`transport::Connect`] - Factory for fresh connections
//! - [`transport::TransportError`] - Failure classification
//! - [`clock::Clock`] - Monotonic time and blocking sleep

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod serial;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use serial::{DataBits, Parity, SerialConfig, StopBits};
pub use transport::{Connect, ErrorKind, Transport, TransportError};
