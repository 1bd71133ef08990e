use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddrV4};

use bytes::{BufMut, Bytes, BytesMut};
use cmdlink_transport::NodeStream;
use tracing::debug;

use crate::codes::{expects_response, CommandCode};
use crate::error::{Result, WireError};
use crate::frame::{read_exact_or_closed, Frame};
use crate::result::ResultFrame;

/// Size of the inbound address header: 4 address bytes + 2 port bytes.
pub const ADDRESS_HEADER_SIZE: usize = 6;

/// A command: a command code plus a [`Frame`], with an optional destination
/// address.
///
/// The destination is transport metadata used only to route the outbound
/// connection; it is never part of the serialized command bytes. It is set
/// exactly once — either at construction via [`to`](CommandFrame::to), or
/// through [`set_destination`](CommandFrame::set_destination) on the
/// inbound/relay path — and is not re-settable.
///
/// Each instance is exclusively owned by the call site that created it;
/// nothing here is shared across concurrent operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    code: CommandCode,
    body: Frame,
    destination: Option<SocketAddrV4>,
}

impl CommandFrame {
    /// Create a command with no destination.
    pub fn new(code: CommandCode, body: Frame) -> Self {
        Self {
            code,
            body,
            destination: None,
        }
    }

    /// Create an outbound command routed to `destination`.
    pub fn to(code: CommandCode, body: Frame, destination: SocketAddrV4) -> Self {
        Self {
            code,
            body,
            destination: Some(destination),
        }
    }

    /// The command code.
    pub fn code(&self) -> CommandCode {
        self.code
    }

    /// The command body.
    pub fn body(&self) -> &Frame {
        &self.body
    }

    /// Consume the command and return its body.
    pub fn into_body(self) -> Frame {
        self.body
    }

    /// Whether this command is answered with a [`ResultFrame`] on the same
    /// connection.
    pub fn expects_response(&self) -> bool {
        expects_response(self.code)
    }

    /// Assign the destination address. Single assignment: fails with
    /// [`WireError::DestinationAlreadySet`] if one was already attached.
    pub fn set_destination(&mut self, destination: SocketAddrV4) -> Result<()> {
        if self.destination.is_some() {
            return Err(WireError::DestinationAlreadySet);
        }
        self.destination = Some(destination);
        Ok(())
    }

    /// The destination address, failing with [`WireError::AddressNotSet`]
    /// if none was assigned. There is no default.
    pub fn destination(&self) -> Result<SocketAddrV4> {
        self.destination.ok_or(WireError::AddressNotSet)
    }

    /// The destination IPv4 address, failing if unset.
    pub fn destination_ip(&self) -> Result<Ipv4Addr> {
        Ok(*self.destination()?.ip())
    }

    /// The destination port, failing if unset.
    pub fn destination_port(&self) -> Result<u16> {
        Ok(self.destination()?.port())
    }

    /// Encode into the outbound wire format: 2 big-endian code bytes, then
    /// the embedded frame. The destination address is never included.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(2 + self.body.wire_size());
        dst.put_u16(self.code.as_u16());
        self.body.encode(dst);
    }

    /// Encode into a standalone byte buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(2 + self.body.wire_size());
        self.encode(&mut dst);
        dst.freeze()
    }

    /// Encode with the 6-byte address header preceding the command bytes.
    ///
    /// This is the relay format: a forwarded command retains its
    /// originator's endpoint. Fails with [`WireError::AddressNotSet`] if no
    /// destination is attached.
    pub fn encode_addressed(&self, dst: &mut BytesMut) -> Result<()> {
        let addr = self.destination()?;
        dst.reserve(ADDRESS_HEADER_SIZE + 2 + self.body.wire_size());
        dst.put_slice(&addr.ip().octets());
        dst.put_u16(addr.port());
        self.encode(dst);
        Ok(())
    }

    /// Encode the addressed format into a standalone byte buffer.
    pub fn to_bytes_addressed(&self) -> Result<Bytes> {
        let mut dst = BytesMut::new();
        self.encode_addressed(&mut dst)?;
        Ok(dst.freeze())
    }

    /// Read one command from a stream. Destination is left unset.
    ///
    /// Fails with [`WireError::InvalidCommandCode`] if the 2-byte code is
    /// outside the closed set of 6, before touching the rest of the stream.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut code_buf = [0u8; 2];
        read_exact_or_closed(reader, &mut code_buf)?;
        let value = u16::from_be_bytes(code_buf);
        let code = CommandCode::from_u16(value).ok_or(WireError::InvalidCommandCode(value))?;

        let body = Frame::read_from(reader)?;
        Ok(Self::new(code, body))
    }

    /// Read one address-prefixed command from a stream.
    ///
    /// Reads the 6-byte endpoint header (4 address bytes, 2 port bytes, all
    /// big-endian), then an ordinary command, and attaches the parsed
    /// endpoint as the destination.
    pub fn read_from_addressed<R: Read>(reader: &mut R) -> Result<Self> {
        let mut ip_buf = [0u8; 4];
        read_exact_or_closed(reader, &mut ip_buf)?;
        let mut port_buf = [0u8; 2];
        read_exact_or_closed(reader, &mut port_buf)?;

        let mut command = Self::read_from(reader)?;
        command.set_destination(SocketAddrV4::new(
            Ipv4Addr::from(ip_buf),
            u16::from_be_bytes(port_buf),
        ))?;
        Ok(command)
    }

    /// Send this command without awaiting a response.
    ///
    /// Opens a connection to the destination, writes the serialized bytes,
    /// flushes, and closes. The connection is released on every exit path,
    /// including write failure. No response is read regardless of
    /// [`expects_response`](CommandFrame::expects_response).
    pub fn send(&self) -> Result<()> {
        let addr = self.destination()?;
        let mut stream = NodeStream::connect(addr)?;
        debug!(code = ?self.code, %addr, "sending command");

        self.write_to(&mut stream)?;
        Ok(())
    }

    /// Send this command and read one [`ResultFrame`] from the same
    /// connection.
    ///
    /// Fails with [`WireError::NoResponseExpected`] before any I/O if the
    /// command expects no response — use [`send`](CommandFrame::send) for
    /// those. The connection is released on every exit path: success, parse
    /// failure, or transport failure.
    pub fn send_and_await(&self) -> Result<ResultFrame> {
        if !self.expects_response() {
            return Err(WireError::NoResponseExpected(self.code));
        }

        let addr = self.destination()?;
        let mut stream = NodeStream::connect(addr)?;
        debug!(code = ?self.code, %addr, "sending command, awaiting result");

        self.write_to(&mut stream)?;
        let result = ResultFrame::read_from(&mut stream)?;
        debug!(code = ?result.code(), "received result");
        Ok(result)
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes()).map_err(WireError::Io)?;
        writer.flush().map_err(WireError::Io)
    }
}
