//! Hermes Ports
//!
//! Port definitions (traits) for the Hermes normalization layer.
//! These define the boundaries between the core retrieval logic and the
//! transport infrastructure that actually talks to an exchange.

mod error;
mod transport;

pub use error::TransportError;
pub use transport::Transport;
