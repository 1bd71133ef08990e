use crate::codes::CommandCode;

/// Errors that can occur while encoding, decoding, or exchanging frames.
///
/// Decode errors mean the connection is desynchronized and must be dropped.
/// Usage errors are raised before any I/O occurs. Stream failures are
/// surfaced unwrapped after the connection is released.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A decoded command code is outside the closed set of 6.
    #[error("invalid command code {0:#06x}")]
    InvalidCommandCode(u16),

    /// A decoded result code is outside the closed set of 7.
    #[error("invalid result code {0:#04x}")]
    InvalidResultCode(u8),

    /// The payload exceeds the 16-bit length field ceiling.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A destination address is required but was never assigned.
    #[error("destination address not set")]
    AddressNotSet,

    /// The destination address was already assigned; it is set exactly once.
    #[error("destination address already set")]
    DestinationAlreadySet,

    /// The command expects no response; use `send` instead of `send_and_await`.
    #[error("command {0:?} expects no response; use send() instead")]
    NoResponseExpected(CommandCode),

    /// The stream ended before a complete frame was read (short read).
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,

    /// An I/O error occurred on the stream.
    #[error("wire I/O error: {0}")]
    Io(std::io::Error),

    /// A transport-level failure (connect, bind, accept).
    #[error("transport error: {0}")]
    Transport(#[from] cmdlink_transport::TransportError),
}

pub type Result<T> = std::result::Result<T, WireError>;
