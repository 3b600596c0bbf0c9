//! Driver error types.

use droidfx_trigger_protocol::ProtocolError;
use thiserror::Error;

/// Errors returned by driver operations.
///
/// None of these is fatal to the caller's process, and the mirrored
/// device state is left unchanged by every failure path; callers treat
/// stale mirrored values as the degraded default and decide on their own
/// retry policy.
#[derive(Error, Debug)]
pub enum TriggerError {
    /// The wait-phase deadline elapsed before a minimum response arrived.
    #[error("timed out after {timeout_ms} ms waiting for a response ({available} bytes available)")]
    Timeout {
        /// The configured wait, in milliseconds.
        timeout_ms: u64,
        /// Bytes available when the deadline elapsed.
        available: usize,
    },

    /// The response buffer filled before a terminator byte was read.
    #[error("response truncated: no terminator within {capacity} bytes")]
    TruncatedResponse {
        /// Response buffer capacity.
        capacity: usize,
    },

    /// A decoded payload does not fit its destination buffer.
    #[error("response payload of {len} bytes exceeds capacity {capacity}")]
    ResponseTooLarge {
        /// Payload length decoded from the response.
        len: usize,
        /// Destination buffer capacity.
        capacity: usize,
    },

    /// Frame validation or decoding failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The transport failed.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}
