use std::io::Write;
use std::net::SocketAddrV4;

use cmdlink_transport::{NodeListener, NodeStream};
use cmdlink_wire::{CommandFrame, ResultFrame, WireError};
use tracing::{debug, warn};

use crate::error::Result;

/// Produces a [`ResultFrame`] for each inbound command.
///
/// The result is written back only when the command's code expects a
/// response; for fire-and-forget commands it is dropped.
pub trait CommandHandler {
    fn handle(&self, command: CommandFrame) -> ResultFrame;
}

impl<F> CommandHandler for F
where
    F: Fn(CommandFrame) -> ResultFrame,
{
    fn handle(&self, command: CommandFrame) -> ResultFrame {
        self(command)
    }
}

/// Accepts connections and runs one command/result exchange per connection.
pub struct NodeServer {
    listener: NodeListener,
    addressed: bool,
}

impl NodeServer {
    /// Bind and listen on `addr`. Port 0 is supported; see
    /// [`local_addr`](NodeServer::local_addr).
    pub fn bind(addr: SocketAddrV4) -> Result<Self> {
        Ok(Self {
            listener: NodeListener::bind(addr)?,
            addressed: false,
        })
    }

    /// Select the address-prefixed inbound variant: each command is preceded
    /// by a 6-byte originator endpoint, attached as the parsed command's
    /// destination.
    pub fn with_addressed_reads(mut self, addressed: bool) -> Self {
        self.addressed = addressed;
        self
    }

    /// The address this server is bound to.
    pub fn local_addr(&self) -> SocketAddrV4 {
        self.listener.local_addr()
    }

    /// Accept one connection and run one exchange.
    pub fn serve_once<H: CommandHandler>(&self, handler: &H) -> Result<()> {
        let (stream, _peer) = self.listener.accept()?;
        self.handle_connection(stream, handler)
    }

    /// Accept connections until an accept failure.
    ///
    /// Per-connection failures are logged and do not stop the loop; a
    /// desynchronized or misbehaving sender costs only its own connection.
    pub fn serve<H: CommandHandler>(&self, handler: &H) -> Result<()> {
        loop {
            let (stream, peer) = self.listener.accept()?;
            if let Err(err) = self.handle_connection(stream, handler) {
                warn!(%peer, %err, "failed exchange");
            }
        }
    }

    fn handle_connection<H: CommandHandler>(
        &self,
        mut stream: NodeStream,
        handler: &H,
    ) -> Result<()> {
        let command = if self.addressed {
            CommandFrame::read_from_addressed(&mut stream)?
        } else {
            CommandFrame::read_from(&mut stream)?
        };
        debug!(code = ?command.code(), "received command");

        let expects_response = command.expects_response();
        let result = handler.handle(command);

        if expects_response {
            stream
                .write_all(&result.to_bytes())
                .map_err(WireError::Io)?;
            stream.flush().map_err(WireError::Io)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::sync::mpsc;

    use cmdlink_wire::{CommandCode, Frame, ResultCode};

    use super::*;

    fn bind_localhost() -> NodeServer {
        NodeServer::bind(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0)).unwrap()
    }

    #[test]
    fn ping_is_answered() {
        let server = bind_localhost();
        let addr = server.local_addr();

        let handle = std::thread::spawn(move || {
            server
                .serve_once(&|command: CommandFrame| {
                    assert_eq!(command.code(), CommandCode::Ping);
                    ResultFrame::ok_empty()
                })
                .unwrap();
        });

        let result = CommandFrame::to(CommandCode::Ping, Frame::empty(), addr)
            .send_and_await()
            .unwrap();
        assert!(result.is_ok());

        handle.join().unwrap();
    }

    #[test]
    fn fire_and_forget_gets_no_response() {
        let server = bind_localhost();
        let addr = server.local_addr();
        let (tx, rx) = mpsc::channel();

        let handle = std::thread::spawn(move || {
            server
                .serve_once(&move |command: CommandFrame| {
                    tx.send(command.body().payload().to_vec()).unwrap();
                    // Dropped by the server: Output expects no response.
                    ResultFrame::new(ResultCode::InternalError, Frame::empty())
                })
                .unwrap();
        });

        CommandFrame::to(
            CommandCode::Output,
            Frame::new(b"event".to_vec()).unwrap(),
            addr,
        )
        .send()
        .unwrap();

        assert_eq!(rx.recv().unwrap(), b"event");
        handle.join().unwrap();
    }

    #[test]
    fn addressed_reads_attach_originator() {
        let server = bind_localhost().with_addressed_reads(true);
        let addr = server.local_addr();
        let origin = SocketAddrV4::new(Ipv4Addr::new(172, 16, 5, 9), 7001);

        let handle = std::thread::spawn(move || {
            server
                .serve_once(&move |command: CommandFrame| {
                    assert_eq!(command.destination().unwrap(), origin);
                    assert_eq!(command.code(), CommandCode::Call);
                    ResultFrame::ok_empty()
                })
                .unwrap();
        });

        // Relay-style client: write the addressed layout, then read the result.
        let command = CommandFrame::to(CommandCode::Call, Frame::empty(), origin);
        let mut stream = NodeStream::connect(addr).unwrap();
        stream
            .write_all(&command.to_bytes_addressed().unwrap())
            .unwrap();
        stream.flush().unwrap();
        let result = ResultFrame::read_from(&mut stream).unwrap();
        assert!(result.is_ok());

        handle.join().unwrap();
    }

    #[test]
    fn garbage_code_fails_the_exchange_only() {
        let server = bind_localhost();
        let addr = server.local_addr();

        let handle = std::thread::spawn(move || {
            let err = server
                .serve_once(&|_: CommandFrame| ResultFrame::ok_empty())
                .unwrap_err();
            assert!(matches!(
                err,
                crate::NodeError::Wire(WireError::InvalidCommandCode(0x9))
            ));
        });

        let mut stream = NodeStream::connect(addr).unwrap();
        stream.write_all(&[0x00, 0x09, 0x00, 0x00]).unwrap();
        stream.flush().unwrap();
        drop(stream);

        handle.join().unwrap();
    }

    #[test]
    fn handler_failure_codes_reach_the_caller() {
        let server = bind_localhost();
        let addr = server.local_addr();

        let handle = std::thread::spawn(move || {
            server
                .serve_once(&|_: CommandFrame| {
                    ResultFrame::new(ResultCode::IllegalPayload, Frame::empty())
                })
                .unwrap();
        });

        let result = CommandFrame::to(
            CommandCode::Load,
            Frame::new(b"not a module".to_vec()).unwrap(),
            addr,
        )
        .send_and_await()
        .unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.code(), ResultCode::IllegalPayload);
        handle.join().unwrap();
    }
}
