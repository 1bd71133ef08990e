/// Errors that can occur while serving inbound commands.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// Transport-level error (bind, accept).
    #[error("transport error: {0}")]
    Transport(#[from] cmdlink_transport::TransportError),

    /// Wire-level error (decode failure, stream failure).
    #[error("wire error: {0}")]
    Wire(#[from] cmdlink_wire::WireError),
}

pub type Result<T> = std::result::Result<T, NodeError>;
