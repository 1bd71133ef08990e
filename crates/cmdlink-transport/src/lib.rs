//! TCP byte-stream transport for the cmdlink command protocol.
//!
//! Provides the connection primitives everything else builds on:
//! - [`NodeStream`] — a connected stream to a compute node (Read + Write)
//! - [`NodeListener`] — bind/accept for the inbound direction
//!
//! This is the lowest layer. The protocol core consumes nothing beyond
//! "read exactly N bytes", "write bytes", and "close".

pub mod error;
pub mod listener;
pub mod stream;

pub use error::{Result, TransportError};
pub use listener::NodeListener;
pub use stream::NodeStream;
