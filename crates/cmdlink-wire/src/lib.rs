//! Command/result wire protocol for remote compute nodes.
//!
//! This is the core value-add layer of cmdlink. Three message types share
//! one atomic unit, a length-prefixed opaque payload. All integers are
//! big-endian (network byte order):
//!
//! ```text
//! Frame                  length:u16  payload:u8[length]
//! ResultFrame            code:u8     Frame
//! CommandFrame           code:u16    Frame
//! CommandFrame (inbound, ip:u32      port:u16  code:u16  Frame
//!   addressed)
//! ```
//!
//! An outbound exchange is one connection: connect, write the command,
//! optionally read one result, close. Short reads are errors, never
//! tolerated — a desynchronized stream cannot be reframed.

pub mod codes;
pub mod command;
pub mod error;
pub mod frame;
pub mod result;

pub use codes::{expects_response, CommandCode, EntrypointCode, ResultCode};
pub use command::{CommandFrame, ADDRESS_HEADER_SIZE};
pub use error::{Result, WireError};
pub use frame::{Frame, LENGTH_PREFIX_SIZE, MAX_PAYLOAD};
pub use result::ResultFrame;
