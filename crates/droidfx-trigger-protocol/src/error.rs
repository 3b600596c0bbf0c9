//! Protocol error types.

use thiserror::Error;

/// Errors produced while validating or decoding frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame (or its payload) is too short to be valid.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Frame does not open with the fixed header pair.
    #[error("bad frame header: got {got:02X?}")]
    BadHeader {
        /// The two bytes received where the header pair belongs.
        got: [u8; 2],
    },

    /// Frame does not end with the terminator sentinel.
    #[error("bad frame terminator: got 0x{got:02X}")]
    BadTerminator {
        /// The final byte received.
        got: u8,
    },

    /// Declared total length disagrees with the received byte count.
    ///
    /// The receiver stops at the first terminator-valued byte, so a
    /// terminator value occurring inside a payload shows up here rather
    /// than as garbage fields.
    #[error("frame length mismatch: length byte says {declared}, received {actual}")]
    LengthMismatch {
        /// Value of the frame's length byte.
        declared: usize,
        /// Bytes actually received.
        actual: usize,
    },

    /// Response code not recognized by this driver.
    #[error("unknown response kind: 0x{0:02X}")]
    UnknownResponseKind(u8),
}
