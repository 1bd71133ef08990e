use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, SocketAddrV4, TcpStream};
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TransportError};

/// A connected stream to a compute node — implements Read + Write.
///
/// This is the fundamental I/O type returned by transport operations.
/// Closing is RAII: dropping the stream releases the connection, so a
/// scoped exchange cannot leak a socket on any exit path. [`shutdown`]
/// is available when the close must happen before the value goes out
/// of scope.
///
/// [`shutdown`]: NodeStream::shutdown
pub struct NodeStream {
    inner: TcpStream,
}

impl Read for NodeStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for NodeStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl NodeStream {
    /// Connect to a node listening at `addr` (blocking).
    pub fn connect(addr: SocketAddrV4) -> Result<Self> {
        let inner = TcpStream::connect(addr).map_err(|e| TransportError::Connect {
            addr,
            source: e,
        })?;
        debug!(%addr, "connected to node");
        Ok(Self::from_tcp(inner))
    }

    /// Connect with an explicit connect timeout.
    pub fn connect_timeout(addr: SocketAddrV4, timeout: Duration) -> Result<Self> {
        let inner = TcpStream::connect_timeout(&SocketAddr::V4(addr), timeout).map_err(|e| {
            TransportError::Connect { addr, source: e }
        })?;
        debug!(%addr, ?timeout, "connected to node");
        Ok(Self::from_tcp(inner))
    }

    pub(crate) fn from_tcp(inner: TcpStream) -> Self {
        // One command/result exchange per connection; never batch writes.
        let _ = inner.set_nodelay(true);
        Self { inner }
    }

    /// Set read timeout on the underlying stream.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.inner.set_read_timeout(timeout).map_err(Into::into)
    }

    /// Set write timeout on the underlying stream.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.inner.set_write_timeout(timeout).map_err(Into::into)
    }

    /// Address of the connected peer.
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        self.inner.peer_addr().map_err(Into::into)
    }

    /// Shut down both halves of the connection.
    ///
    /// Dropping the stream closes it as well; use this when the close
    /// must be observable before the value is dropped.
    pub fn shutdown(&self) -> Result<()> {
        self.inner.shutdown(Shutdown::Both).map_err(Into::into)
    }
}

impl std::fmt::Debug for NodeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeStream")
            .field("peer", &self.inner.peer_addr().ok())
            .finish()
    }
}
