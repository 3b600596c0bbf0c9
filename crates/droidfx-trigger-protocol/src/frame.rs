//! Frame building and validation.
//!
//! Every message, in either direction, shares one fixed layout:
//!
//! ```text
//! +------+------+-----+------+--------------+------+
//! | 0xF0 | 0xAA | len | code | payload ...  | 0x55 |
//! +------+------+-----+------+--------------+------+
//! ```
//!
//! `len` counts the entire frame, header and terminator included.

use bytes::BufMut;

use crate::constants::*;
use crate::error::ProtocolError;

/// Build a complete frame around `payload`.
///
/// The caller supplies payloads already laid out per the command's wire
/// format; this adds the header pair, length byte, code and terminator.
pub fn build_frame(code: u8, payload: &[u8]) -> Vec<u8> {
    debug_assert!(payload.len() <= MAX_FRAME_SIZE - FRAME_OVERHEAD);
    let total = FRAME_OVERHEAD + payload.len();
    let mut buf = Vec::with_capacity(total);
    buf.put_u8(FRAME_HEAD_1);
    buf.put_u8(FRAME_HEAD_2);
    buf.put_u8(total as u8);
    buf.put_u8(code);
    buf.extend_from_slice(payload);
    buf.put_u8(FRAME_EOM);
    buf
}

/// A received frame whose framing has been checked.
///
/// Validation covers exactly what the board guarantees on every frame:
/// the header pair and the terminator sentinel. The declared-length byte
/// is consulted only when the payload is extracted, where a disagreement
/// with the received byte count is reported instead of read past.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedFrame<'a> {
    bytes: &'a [u8],
}

impl<'a> ValidatedFrame<'a> {
    /// Validate the framing of a received byte sequence.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < MIN_FRAME_SIZE {
            return Err(ProtocolError::FrameTooShort {
                expected: MIN_FRAME_SIZE,
                actual: bytes.len(),
            });
        }
        if bytes[0] != FRAME_HEAD_1 || bytes[1] != FRAME_HEAD_2 {
            return Err(ProtocolError::BadHeader {
                got: [bytes[0], bytes[1]],
            });
        }
        let last = bytes[bytes.len() - 1];
        if last != FRAME_EOM {
            return Err(ProtocolError::BadTerminator { got: last });
        }
        Ok(ValidatedFrame { bytes })
    }

    /// The response-kind code byte.
    pub fn code(&self) -> u8 {
        self.bytes[OFFSET_CODE]
    }

    /// Total frame length claimed by the length byte.
    pub fn declared_len(&self) -> usize {
        self.bytes[OFFSET_LENGTH] as usize
    }

    /// The payload slice, bounded by the declared length.
    pub fn payload(&self) -> Result<&'a [u8], ProtocolError> {
        let declared = self.declared_len();
        if declared != self.bytes.len() {
            return Err(ProtocolError::LengthMismatch {
                declared,
                actual: self.bytes.len(),
            });
        }
        Ok(&self.bytes[OFFSET_PAYLOAD..declared - 1])
    }

    /// The whole validated frame.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}
