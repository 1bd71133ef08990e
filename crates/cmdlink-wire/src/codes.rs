//! Command, result, and entrypoint code tables.
//!
//! All three are closed sets. Values outside a set are invalid on the wire
//! and are rejected at decode time; higher layers must not invent new ones.

/// A command kind, sent as a big-endian `u16` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CommandCode {
    Connect = 0x0,
    Call = 0x1,
    RemoteOutput = 0x2,
    Load = 0x3,
    Ping = 0x4,
    Output = 0x5,
}

/// Response-expectation table, indexed by command code value.
///
/// Order matches the discriminants: Connect, Call, RemoteOutput, Load,
/// Ping, Output.
const RESPONSE_EXPECTED: [bool; 6] = [true, true, false, true, true, false];

/// Whether a command of this kind is answered with a [`ResultFrame`] on the
/// same connection.
///
/// [`ResultFrame`]: crate::ResultFrame
pub fn expects_response(code: CommandCode) -> bool {
    RESPONSE_EXPECTED[code as u16 as usize]
}

impl CommandCode {
    /// Every valid command code, in wire-value order.
    pub const ALL: [CommandCode; 6] = [
        CommandCode::Connect,
        CommandCode::Call,
        CommandCode::RemoteOutput,
        CommandCode::Load,
        CommandCode::Ping,
        CommandCode::Output,
    ];

    /// Decode a wire value, `None` if outside the closed set.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0 => Some(CommandCode::Connect),
            0x1 => Some(CommandCode::Call),
            0x2 => Some(CommandCode::RemoteOutput),
            0x3 => Some(CommandCode::Load),
            0x4 => Some(CommandCode::Ping),
            0x5 => Some(CommandCode::Output),
            _ => None,
        }
    }

    /// The wire value of this code.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// A result status, sent as a single byte on the wire.
///
/// Only [`Ok`](ResultCode::Ok) signals success; every other value is a
/// failure classification produced by the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResultCode {
    Ok = 0x0,
    IllegalCommand = 0x1,
    IllegalPayload = 0x2,
    InternalError = 0x3,
    BadRequest = 0x4,
    CryptoError = 0x5,
    GenericError = 0x6,
}

impl ResultCode {
    /// Every valid result code, in wire-value order.
    pub const ALL: [ResultCode; 7] = [
        ResultCode::Ok,
        ResultCode::IllegalCommand,
        ResultCode::IllegalPayload,
        ResultCode::InternalError,
        ResultCode::BadRequest,
        ResultCode::CryptoError,
        ResultCode::GenericError,
    ];

    /// Decode a wire value, `None` if outside the closed set.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x0 => Some(ResultCode::Ok),
            0x1 => Some(ResultCode::IllegalCommand),
            0x2 => Some(ResultCode::IllegalPayload),
            0x3 => Some(ResultCode::InternalError),
            0x4 => Some(ResultCode::BadRequest),
            0x5 => Some(ResultCode::CryptoError),
            0x6 => Some(ResultCode::GenericError),
            _ => None,
        }
    }

    /// The wire value of this code.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Entrypoint selector used by higher layers when building command payloads.
///
/// Not parsed by this crate; published here as shared vocabulary so other
/// components cannot drift from the closed set of 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EntrypointCode {
    SetKey = 0x0,
    HandleInput = 0x1,
}

impl EntrypointCode {
    /// Every valid entrypoint code, in wire-value order.
    pub const ALL: [EntrypointCode; 2] = [EntrypointCode::SetKey, EntrypointCode::HandleInput];

    /// Decode a value, `None` if outside the closed set.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0 => Some(EntrypointCode::SetKey),
            0x1 => Some(EntrypointCode::HandleInput),
            _ => None,
        }
    }

    /// The numeric value of this selector.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_expectation_exhaustive() {
        for code in CommandCode::ALL {
            let expected = !matches!(code, CommandCode::RemoteOutput | CommandCode::Output);
            assert_eq!(expects_response(code), expected, "code {code:?}");
        }
    }

    #[test]
    fn command_codes_roundtrip() {
        for code in CommandCode::ALL {
            assert_eq!(CommandCode::from_u16(code.as_u16()), Some(code));
        }
    }

    #[test]
    fn command_codes_closed_set() {
        assert_eq!(CommandCode::from_u16(0x6), None);
        assert_eq!(CommandCode::from_u16(0xFF), None);
        assert_eq!(CommandCode::from_u16(u16::MAX), None);
    }

    #[test]
    fn result_codes_roundtrip() {
        for code in ResultCode::ALL {
            assert_eq!(ResultCode::from_u8(code.as_u8()), Some(code));
        }
    }

    #[test]
    fn result_codes_closed_set() {
        assert_eq!(ResultCode::from_u8(0x7), None);
        assert_eq!(ResultCode::from_u8(u8::MAX), None);
    }

    #[test]
    fn entrypoint_codes_closed_set() {
        for code in EntrypointCode::ALL {
            assert_eq!(EntrypointCode::from_u16(code.as_u16()), Some(code));
        }
        assert_eq!(EntrypointCode::from_u16(0x2), None);
    }
}
