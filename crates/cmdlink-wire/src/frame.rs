use std::io::{ErrorKind, Read};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};

/// Maximum payload size representable by the 2-byte length prefix.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// Length prefix size in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// A length-prefixed opaque byte payload — the atomic wire unit.
///
/// The length is implicit (`payload.len()`), so the `length == len(payload)`
/// invariant holds by construction. Payloads over [`MAX_PAYLOAD`] bytes
/// cannot be represented and are rejected before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Bytes,
}

impl Frame {
    /// Create a frame, rejecting payloads the 16-bit length field cannot hold.
    pub fn new(payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        if payload.len() > MAX_PAYLOAD {
            return Err(WireError::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD,
            });
        }
        Ok(Self { payload })
    }

    /// An empty-payload frame (length 0).
    pub fn empty() -> Self {
        Self {
            payload: Bytes::new(),
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// True if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// The payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Consume the frame and return its payload.
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Total wire size (length prefix + payload).
    pub fn wire_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.payload.len()
    }

    /// Encode into the wire format: 2 big-endian length bytes, then the
    /// payload verbatim.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.wire_size());
        dst.put_u16(self.payload.len() as u16);
        dst.put_slice(&self.payload);
    }

    /// Encode into a standalone byte buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(self.wire_size());
        self.encode(&mut dst);
        dst.freeze()
    }

    /// Read one frame from a stream.
    ///
    /// Reads exactly 2 length bytes, then exactly that many payload bytes.
    /// A stream that yields fewer bytes than requested fails with
    /// [`WireError::ConnectionClosed`] — a short read desynchronizes all
    /// subsequent framing on the connection.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut len_buf = [0u8; LENGTH_PREFIX_SIZE];
        read_exact_or_closed(reader, &mut len_buf)?;
        let len = u16::from_be_bytes(len_buf) as usize;

        if len == 0 {
            return Ok(Self::empty());
        }

        let mut payload = vec![0u8; len];
        read_exact_or_closed(reader, &mut payload)?;
        Ok(Self {
            payload: Bytes::from(payload),
        })
    }
}

/// `read_exact` with EOF mapped to [`WireError::ConnectionClosed`].
pub(crate) fn read_exact_or_closed<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => Err(WireError::ConnectionClosed),
        Err(err) => Err(WireError::Io(err)),
    }
}
