//! Host-side support for driving Hanover flipdot signs
//!
//! Glues the transport-agnostic [`hanover_core::Controller`] to real sinks:
//!
//! - Serial ports (direct: failures propagate)
//! - TCP serial bridges (resilient: reconnects on reset/broken pipe)
//! - TOML configuration listing the bus transport and its signs
//!
//! ```no_run
//! # fn main() -> Result<(), hanover_host::HostError> {
//! let config = hanover_host::load_config("signs.toml")?;
//! let mut controller = hanover_host::connect(&config)?;
//!
//! let mut image = controller.resolve_sign(Some("front"))?.create_blank_image();
//! image.set(0, 0, true);
//! controller.draw(&image, Some("front"))?;
//! # Ok(())
//! # }
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod clock;
pub mod config;
pub mod error;
pub mod transport;

use tracing::info;

use hanover_core::Controller;

pub use clock::SystemClock;
pub use config::{load_config, parse_config, HostConfig, RetryConfig, TransportConfig};
pub use error::HostError;
pub use transport::{
    open_serial, HostTransport, ResilientTransport, RetryPolicy, SerialTransport, TcpConnector,
    WriterTransport,
};

/// Controller over whichever transport the configuration selected
pub type HostController = Controller<HostTransport>;

/// Open the configured transport and register every configured sign
pub fn connect(config: &HostConfig) -> Result<HostController, HostError> {
    let transport = HostTransport::open(&config.transport)?;
    let controller = Controller::from_config(&config.signs, transport)?;

    info!(signs = config.signs.len(), "sign controller ready");
    Ok(controller)
}
