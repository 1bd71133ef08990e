//! Inbound command serving for cmdlink nodes.
//!
//! The receiving half of the protocol: accept a connection, parse one
//! [`CommandFrame`](cmdlink_wire::CommandFrame) (optionally address-prefixed),
//! hand it to a caller-supplied handler, and write back the handler's
//! [`ResultFrame`](cmdlink_wire::ResultFrame) when the command expects one.
//! One exchange per connection, mirroring the outbound state machine.
//!
//! What a command *does* is entirely the handler's concern; handlers
//! classify their own failures as result codes.

pub mod error;
pub mod server;

pub use error::{NodeError, Result};
pub use server::{CommandHandler, NodeServer};
