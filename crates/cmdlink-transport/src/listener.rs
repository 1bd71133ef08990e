use std::net::{SocketAddr, SocketAddrV4, TcpListener};

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::stream::NodeStream;

/// TCP listener for the inbound direction.
///
/// Binding to port 0 is supported; the actual bound address is recorded
/// and available via [`local_addr`](NodeListener::local_addr).
#[derive(Debug)]
pub struct NodeListener {
    listener: TcpListener,
    addr: SocketAddrV4,
}

impl NodeListener {
    /// Bind and listen on `addr`.
    pub fn bind(addr: SocketAddrV4) -> Result<Self> {
        let listener = TcpListener::bind(addr).map_err(|e| TransportError::Bind {
            addr,
            source: e,
        })?;
        let addr = match listener.local_addr().map_err(|e| TransportError::Bind {
            addr,
            source: e,
        })? {
            SocketAddr::V4(v4) => v4,
            SocketAddr::V6(v6) => {
                return Err(TransportError::Bind {
                    addr,
                    source: std::io::Error::other(format!(
                        "bound to unexpected IPv6 address {v6}"
                    )),
                })
            }
        };

        info!(%addr, "listening for commands");
        Ok(Self { listener, addr })
    }

    /// Accept an incoming connection (blocking).
    pub fn accept(&self) -> Result<(NodeStream, SocketAddr)> {
        let (stream, peer) = self.listener.accept().map_err(TransportError::Accept)?;
        debug!(%peer, "accepted connection");
        Ok((NodeStream::from_tcp(stream), peer))
    }

    /// The address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddrV4 {
        self.addr
    }
}
