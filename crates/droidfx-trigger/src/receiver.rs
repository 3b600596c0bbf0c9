//! Timeout-bounded response receiver.
//!
//! Receiving is two-phase, and the phases are deliberately asymmetric:
//!
//! 1. **Wait** — after the request frame is written, poll the transport's
//!    availability until at least [`RESPONSE_MIN_BYTES`] have arrived or
//!    a monotonic deadline elapses. Only this phase honors the caller's
//!    timeout.
//! 2. **Drain** — read one byte at a time, pausing a fixed inter-byte
//!    delay so a slow sender can keep its FIFO ahead of us, until the
//!    terminator value is read, the transport runs dry, or the buffer
//!    capacity is exhausted. The drain never re-checks the deadline:
//!    once the board has started answering, the read runs to completion.
//!
//! The drain has no deadline of its own. A caller that needs a hard upper
//! bound on the whole exchange must put one around the call.

use std::thread;
use std::time::{Duration, Instant};

use droidfx_trigger_protocol::{ValidatedFrame, FRAME_EOM, MIN_FRAME_SIZE};
use tracing::trace;

use crate::error::TriggerError;
use crate::transport::TransportPort;

/// A response is at least one minimum frame; the wait phase holds out
/// for this many bytes before draining.
pub const RESPONSE_MIN_BYTES: usize = MIN_FRAME_SIZE;

/// Interval between availability polls during the wait phase.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Drives the receive protocol over a transport, owning the one response
/// buffer frames are staged in. Rebuilt contents per request; the buffer
/// itself is allocated once.
#[derive(Debug)]
pub struct ResponseReceiver {
    buf: Vec<u8>,
    capacity: usize,
    inter_byte_delay: Duration,
}

impl ResponseReceiver {
    /// Create a receiver with the given buffer capacity and drain-phase
    /// inter-byte delay.
    pub fn new(capacity: usize, inter_byte_delay: Duration) -> Self {
        assert!(
            capacity >= MIN_FRAME_SIZE,
            "response buffer must hold at least a minimum frame"
        );
        ResponseReceiver {
            buf: Vec::with_capacity(capacity),
            capacity,
            inter_byte_delay,
        }
    }

    /// Write `frame` and block, bounded, for the framed response.
    ///
    /// Flushes the transport, writes the request, then runs the two-phase
    /// receive described at module level. On success the returned frame
    /// is already header- and terminator-checked.
    pub fn request_and_wait<'a, P: TransportPort>(
        &'a mut self,
        port: &mut P,
        frame: &[u8],
        timeout: Duration,
    ) -> Result<ValidatedFrame<'a>, TriggerError> {
        port.drain()?;
        port.write_bytes(frame)?;
        trace!("request written: {}", hex::encode(frame));

        Self::wait_for_response(port, timeout)?;
        self.drain_frame(port)
    }

    /// Non-blocking probe: drain and validate a frame only if a full
    /// minimum response is already available, otherwise report pending.
    ///
    /// This is the cooperative-scheduler variant of the receive path;
    /// call it once per tick after sending a query.
    pub fn poll_frame<'a, P: TransportPort>(
        &'a mut self,
        port: &mut P,
    ) -> Result<Option<ValidatedFrame<'a>>, TriggerError> {
        if port.bytes_available()? < RESPONSE_MIN_BYTES {
            return Ok(None);
        }
        self.drain_frame(port).map(Some)
    }

    /// Wait phase: bounded availability poll against a monotonic deadline.
    fn wait_for_response<P: TransportPort>(
        port: &mut P,
        timeout: Duration,
    ) -> Result<(), TriggerError> {
        let deadline = Instant::now() + timeout;
        loop {
            let available = port.bytes_available()?;
            if available >= RESPONSE_MIN_BYTES {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(TriggerError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                    available,
                });
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    /// Drain phase: byte-at-a-time read to terminator, dry transport, or
    /// buffer exhaustion. No deadline by design (see module docs).
    fn drain_frame<'a, P: TransportPort>(
        &'a mut self,
        port: &mut P,
    ) -> Result<ValidatedFrame<'a>, TriggerError> {
        self.buf.clear();
        loop {
            if self.buf.len() == self.capacity {
                return Err(TriggerError::TruncatedResponse {
                    capacity: self.capacity,
                });
            }
            if port.bytes_available()? == 0 {
                break;
            }
            let byte = port.read_byte()?;
            self.buf.push(byte);
            if byte == FRAME_EOM {
                break;
            }
            if !self.inter_byte_delay.is_zero() {
                thread::sleep(self.inter_byte_delay);
            }
        }
        trace!("response drained: {}", hex::encode(&self.buf));
        Ok(ValidatedFrame::parse(&self.buf)?)
    }
}
