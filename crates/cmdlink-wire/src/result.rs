use std::io::Read;

use bytes::{BufMut, Bytes, BytesMut};

use crate::codes::ResultCode;
use crate::error::{Result, WireError};
use crate::frame::{read_exact_or_closed, Frame};

/// A response: a status code plus a [`Frame`].
///
/// Owned exclusively by the response path; constructed fresh per exchange
/// and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFrame {
    code: ResultCode,
    body: Frame,
}

impl ResultFrame {
    /// Create a result frame.
    pub fn new(code: ResultCode, body: Frame) -> Self {
        Self { code, body }
    }

    /// A success result with an empty body.
    pub fn ok_empty() -> Self {
        Self::new(ResultCode::Ok, Frame::empty())
    }

    /// The status code.
    pub fn code(&self) -> ResultCode {
        self.code
    }

    /// The response body.
    pub fn body(&self) -> &Frame {
        &self.body
    }

    /// Consume the result and return its body.
    pub fn into_body(self) -> Frame {
        self.body
    }

    /// True iff the code is [`ResultCode::Ok`].
    pub fn is_ok(&self) -> bool {
        self.code == ResultCode::Ok
    }

    /// Encode into the wire format: 1 code byte, then the embedded frame.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(1 + self.body.wire_size());
        dst.put_u8(self.code.as_u8());
        self.body.encode(dst);
    }

    /// Encode into a standalone byte buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(1 + self.body.wire_size());
        self.encode(&mut dst);
        dst.freeze()
    }

    /// Read one result frame from a stream.
    ///
    /// Fails with [`WireError::InvalidResultCode`] if the code byte is
    /// outside the closed set of 7, before touching the rest of the stream.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut code_buf = [0u8; 1];
        read_exact_or_closed(reader, &mut code_buf)?;
        let code = ResultCode::from_u8(code_buf[0])
            .ok_or(WireError::InvalidResultCode(code_buf[0]))?;

        let body = Frame::read_from(reader)?;
        Ok(Self { code, body })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn roundtrip_all_codes() {
        for code in ResultCode::ALL {
            let result = ResultFrame::new(code, Frame::new(Bytes::from_static(b"body")).unwrap());
            let decoded = ResultFrame::read_from(&mut Cursor::new(result.to_bytes())).unwrap();
            assert_eq!(decoded, result);
        }
    }

    #[test]
    fn is_ok_only_for_ok() {
        for code in ResultCode::ALL {
            let result = ResultFrame::new(code, Frame::empty());
            assert_eq!(result.is_ok(), code == ResultCode::Ok, "code {code:?}");
        }
    }

    #[test]
    fn invalid_code_rejected() {
        // 0x07 is the first value outside the closed set.
        let wire = vec![0x07, 0x00, 0x00];
        let err = ResultFrame::read_from(&mut Cursor::new(wire)).unwrap_err();
        assert!(matches!(err, WireError::InvalidResultCode(0x07)));

        let wire = vec![0xFF, 0x00, 0x00];
        let err = ResultFrame::read_from(&mut Cursor::new(wire)).unwrap_err();
        assert!(matches!(err, WireError::InvalidResultCode(0xFF)));
    }

    #[test]
    fn wire_layout() {
        let result = ResultFrame::new(
            ResultCode::BadRequest,
            Frame::new(Bytes::from_static(b"why")).unwrap(),
        );
        let wire = result.to_bytes();
        assert_eq!(wire.as_ref(), &[0x04, 0x00, 0x03, b'w', b'h', b'y']);
    }

    #[test]
    fn short_read_mid_result() {
        // Valid code, then a truncated body.
        let wire = vec![0x00, 0x00];
        let err = ResultFrame::read_from(&mut Cursor::new(wire)).unwrap_err();
        assert!(matches!(err, WireError::ConnectionClosed));
    }

    #[test]
    fn empty_stream_is_connection_closed() {
        let err = ResultFrame::read_from(&mut Cursor::new(Vec::<u8>::new())).unwrap_err();
        assert!(matches!(err, WireError::ConnectionClosed));
    }
}
