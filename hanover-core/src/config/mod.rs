//! Configuration types
//!
//! Board-agnostic sign descriptors, deserialisable from TOML with the
//! `serde` feature.

pub mod types;

pub use types::*;
